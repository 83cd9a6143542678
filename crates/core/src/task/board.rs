//! Display projection of the task list
//!
//! Groups tasks by category and sorts each group for rendering. Nothing
//! here is persisted.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::model::{Task, TaskType};

/// Both category lists, each in display order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub long: Vec<Task>,
    pub todo: Vec<Task>,
}

impl Board {
    /// Partition tasks by category and sort each partition
    pub fn project<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut board = Self::default();
        for task in tasks {
            match task.task_type {
                TaskType::Long => board.long.push(task.clone()),
                TaskType::Todo => board.todo.push(task.clone()),
            }
        }

        board.long.sort_by(compare_tasks);
        board.todo.sort_by(compare_tasks);
        board
    }

    pub fn list(&self, category: TaskType) -> &[Task] {
        match category {
            TaskType::Long => &self.long,
            TaskType::Todo => &self.todo,
        }
    }
}

/// Display ordering within one category.
///
/// Tasks with an order key come first, by key. The rest put incomplete
/// before completed, then dated tasks by deadline (equal dates tie), then
/// undated tasks by title. Unparseable deadlines count as undated.
pub fn compare_tasks(a: &Task, b: &Task) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Variant and field order encode the rule chain; derived `Ord` keeps it total.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Ordered(i64),
    Unordered { completed: bool, due: Due<'a> },
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Due<'a> {
    On(NaiveDate),
    Undated(&'a str),
}

fn sort_key(task: &Task) -> SortKey<'_> {
    if let Some(order) = task.order {
        return SortKey::Ordered(order);
    }

    let due = match deadline_of(task) {
        Some(date) => Due::On(date),
        None => Due::Undated(&task.title),
    };
    SortKey::Unordered {
        completed: task.completed,
        due,
    }
}

fn deadline_of(task: &Task) -> Option<NaiveDate> {
    let raw = task.deadline.as_deref()?.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unordered(task_type: TaskType, title: &str) -> Task {
        let mut task = Task::new(task_type, title);
        task.order = None;
        task
    }

    #[test]
    fn test_groups_by_category() {
        let report = Task::new(TaskType::Long, "Write report").with_deadline("2024-12-01");
        let milk = Task::new(TaskType::Todo, "Buy milk");

        let board = Board::project([&report, &milk]);

        assert_eq!(board.long.len(), 1);
        assert_eq!(board.long[0].title, "Write report");
        assert_eq!(board.todo.len(), 1);
        assert_eq!(board.list(TaskType::Todo)[0].title, "Buy milk");
    }

    #[test]
    fn test_order_key_dominates() {
        let mut a = Task::new(TaskType::Todo, "A");
        let mut b = Task::new(TaskType::Todo, "B");
        a.order = Some(1);
        b.order = Some(0);
        a.completed = false;
        b.completed = true;

        let board = Board::project([&a, &b]);

        assert_eq!(board.todo[0].title, "B");
        assert_eq!(board.todo[1].title, "A");
    }

    #[test]
    fn test_incomplete_before_completed_without_order() {
        let mut done = unordered(TaskType::Todo, "A done");
        done.completed = true;
        let open = unordered(TaskType::Todo, "Z open");

        assert_eq!(compare_tasks(&done, &open), Ordering::Greater);
        assert_eq!(compare_tasks(&open, &done), Ordering::Less);
    }

    #[test]
    fn test_deadline_then_title() {
        let late = unordered(TaskType::Long, "Alpha").with_deadline("2025-03-01");
        let early = unordered(TaskType::Long, "Beta").with_deadline("2024-11-30");
        let none = unordered(TaskType::Long, "Gamma");

        assert_eq!(compare_tasks(&early, &late), Ordering::Less);
        assert_eq!(compare_tasks(&late, &none), Ordering::Less);
        assert_eq!(compare_tasks(&none, &late), Ordering::Greater);
    }

    #[test]
    fn test_equal_deadlines_tie() {
        let a = unordered(TaskType::Long, "Zeta").with_deadline("2024-12-01");
        let b = unordered(TaskType::Long, "Alpha").with_deadline("2024-12-01");

        assert_eq!(compare_tasks(&a, &b), Ordering::Equal);

        // Stable sort keeps insertion order for tied tasks
        let board = Board::project([&a, &b]);
        assert_eq!(board.long[0].title, "Zeta");
        assert_eq!(board.long[1].title, "Alpha");
    }

    #[test]
    fn test_unparseable_deadline_counts_as_undated() {
        let vague = unordered(TaskType::Long, "Alpha").with_deadline("soon");
        let dated = unordered(TaskType::Long, "Beta").with_deadline("2024-01-01");
        let other = unordered(TaskType::Long, "Gamma").with_deadline("later");

        assert_eq!(compare_tasks(&dated, &vague), Ordering::Less);
        assert_eq!(compare_tasks(&vague, &other), Ordering::Less);
    }

    #[test]
    fn test_ordered_tasks_before_unordered() {
        let mut ordered = Task::new(TaskType::Todo, "Zed");
        ordered.order = Some(5);
        ordered.completed = true;
        let loose = unordered(TaskType::Todo, "Able");

        assert_eq!(compare_tasks(&ordered, &loose), Ordering::Less);
        assert_eq!(compare_tasks(&loose, &ordered), Ordering::Greater);
    }

    #[test]
    fn test_mixed_order_keys_sort_consistently() {
        let tasks: Vec<Task> = (0..64)
            .map(|i| {
                let mut task = Task::new(TaskType::Todo, format!("task {:02}", (i * 37) % 64));
                task.order = if i % 3 == 0 { None } else { Some(64 - i) };
                task.completed = i % 2 == 0;
                if i % 5 == 0 {
                    task.deadline = Some(format!("2024-12-{:02}", 1 + i % 28));
                }
                task
            })
            .collect();

        let board = Board::project(tasks.iter());

        assert_eq!(board.todo.len(), 64);
        for pair in board.todo.windows(2) {
            assert_ne!(compare_tasks(&pair[0], &pair[1]), Ordering::Greater);
        }
        let first_loose = board.todo.iter().position(|t| t.order.is_none()).unwrap();
        assert!(board.todo[first_loose..].iter().all(|t| t.order.is_none()));
    }
}
