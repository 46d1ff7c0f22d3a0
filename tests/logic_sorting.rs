// Tests for task comparators and sort modes.
use std::cmp::Ordering;
use todotxt::model::{Priority, Sort, Task};
use todotxt::store::TaskBag;

fn task(id: usize, line: &str) -> Task {
    Task::new(id, line)
}

fn ids(tasks: &[&Task]) -> Vec<usize> {
    tasks.iter().map(|t| t.id()).collect()
}

#[test]
fn test_priority_letters_sort_before_none() {
    let a = task(1, "(A) a");
    let z = task(2, "(Z) z");
    let none = task(3, "none");
    assert_eq!(a.compare_by_priority(&z), Ordering::Less);
    assert_eq!(z.compare_by_priority(&none), Ordering::Less);
    assert_eq!(none.compare_by_priority(&a), Ordering::Greater);
    assert!(Priority::Z < Priority::None);
}

#[test]
fn test_priority_ties_are_equal() {
    let b1 = task(1, "(B) one");
    let b2 = task(2, "(B) two");
    assert_eq!(b1.compare_by_priority(&b2), Ordering::Equal);
}

#[test]
fn test_stable_sort_keeps_input_order_on_ties() {
    let mut tasks = vec![task(2, "(B) x"), task(1, "(B) y")];
    tasks.sort_by(|a, b| a.compare_by_priority(b));
    let order: Vec<usize> = tasks.iter().map(|t| t.id()).collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
fn test_priority_is_strict_weak_ordering() {
    let tasks = vec![
        task(1, "(C) c"),
        task(2, "plain"),
        task(3, "(A) a"),
        task(4, "(C) c2"),
        task(5, "x 2024-01-01 (A) done"),
        task(6, "(B) b"),
    ];
    for a in &tasks {
        assert_eq!(a.compare_by_priority(a), Ordering::Equal);
        for b in &tasks {
            assert_eq!(a.compare_by_priority(b), b.compare_by_priority(a).reverse());
            for c in &tasks {
                if a.compare_by_priority(b) == Ordering::Less
                    && b.compare_by_priority(c) == Ordering::Less
                {
                    assert_eq!(a.compare_by_priority(c), Ordering::Less);
                }
                if a.compare_by_priority(b) == Ordering::Equal
                    && b.compare_by_priority(c) == Ordering::Equal
                {
                    assert_eq!(a.compare_by_priority(c), Ordering::Equal);
                }
            }
        }
    }
}

#[test]
fn test_id_comparators() {
    let one = task(1, "b");
    let two = task(2, "a");
    assert_eq!(one.compare_by_id_ascending(&two), Ordering::Less);
    assert_eq!(one.compare_by_id_descending(&two), Ordering::Greater);
    assert_eq!(one.compare_by_id_descending(&one), Ordering::Equal);
}

#[test]
fn test_text_comparator_is_case_sensitive() {
    let upper = task(1, "Zebra");
    let lower = task(2, "apple");
    assert_eq!(upper.compare_by_text_ascending(&lower), Ordering::Less);
    // Markers are not part of the compared text.
    let prioritized = task(3, "(A) banana");
    assert_eq!(lower.compare_by_text_ascending(&prioritized), Ordering::Less);
}

#[test]
fn test_sort_modes_parse() {
    assert_eq!("priority".parse::<Sort>().unwrap(), Sort::Priority);
    assert_eq!("ID".parse::<Sort>().unwrap(), Sort::IdAscending);
    assert_eq!("id-desc".parse::<Sort>().unwrap(), Sort::IdDescending);
    assert_eq!("text-ascending".parse::<Sort>().unwrap(), Sort::TextAscending);
    assert!("random".parse::<Sort>().is_err());
    assert_eq!(Sort::default(), Sort::Priority);
}

#[test]
fn test_bag_sorted_by_each_mode() {
    let bag = TaskBag::from_lines(["(B) walk dog", "call mom", "(A) pay rent", "buy milk"]);
    assert_eq!(ids(&bag.sorted(Sort::Priority)), vec![3, 1, 2, 4]);
    assert_eq!(ids(&bag.sorted(Sort::IdAscending)), vec![1, 2, 3, 4]);
    assert_eq!(ids(&bag.sorted(Sort::IdDescending)), vec![4, 3, 2, 1]);
    assert_eq!(ids(&bag.sorted(Sort::TextAscending)), vec![4, 2, 3, 1]);
}

#[test]
fn test_sort_compare_matches_task_comparators() {
    let a = task(1, "(B) b");
    let b = task(2, "(A) a");
    assert_eq!(Sort::Priority.compare(&a, &b), a.compare_by_priority(&b));
    assert_eq!(Sort::IdDescending.compare(&a, &b), Ordering::Greater);
}
