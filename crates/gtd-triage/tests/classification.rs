//! Classifier behavior over small task snapshots.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use gtd_core::entities::{Project, Task};
use gtd_triage::{LimitRules, find_over_and_under_limit_projects, find_stale_low_priority_tasks};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
}

fn project(id: &str, name: &str) -> Project {
    Project {
        id: id.into(),
        name: name.into(),
        url: String::new(),
    }
}

fn task(id: &str, project_id: &str, labels: &[&str]) -> Task {
    Task {
        id: id.into(),
        project_id: project_id.into(),
        content: format!("task {id}"),
        labels: labels.iter().map(ToString::to_string).collect(),
        created_at: now() - Duration::days(1),
        priority: 1,
    }
}

fn aged(id: &str, age: Duration, priority: i32) -> Task {
    Task {
        created_at: now() - age,
        priority,
        ..task(id, "1", &[])
    }
}

fn decoded(url: &str) -> String {
    urlencoding::decode(url).unwrap().into_owned()
}

#[test]
fn five_marked_tasks_over_a_limit_of_three() {
    let projects = vec![project("1", "Work")];
    let tasks: Vec<_> = (0..5)
        .map(|i| task(&format!("t{i}"), "1", &["next_action"]))
        .collect();

    let (too_many, zero) =
        find_over_and_under_limit_projects(&tasks, &projects, &LimitRules::default());

    assert!(zero.is_empty());
    assert_eq!(too_many.len(), 1);
    let entry = &too_many[0];
    assert_eq!(entry.project_name, "Work");
    assert_eq!(entry.task_count, 5);
    assert_eq!(entry.limit, 3);
    let url = decoded(&entry.search_url);
    assert!(url.contains("@next_action"), "{url}");
    assert!(url.contains("#Work"), "{url}");
}

#[rstest]
#[case::not_excluded(&[], true)]
#[case::excluded(&["Errands"], false)]
#[case::other_excluded(&["Someday"], true)]
fn project_without_marked_tasks(#[case] excluded: &[&str], #[case] reported: bool) {
    let projects = vec![project("1", "Work"), project("2", "Errands")];
    let tasks = vec![task("a", "1", &["next_action"]), task("b", "2", &["waiting"])];
    let rules = LimitRules {
        excluded_projects: excluded.iter().map(ToString::to_string).collect(),
        ..LimitRules::default()
    };

    let (too_many, zero) = find_over_and_under_limit_projects(&tasks, &projects, &rules);

    assert!(too_many.is_empty());
    if reported {
        assert_eq!(zero.len(), 1);
        assert_eq!(zero[0].project_name, "Errands");
        let url = decoded(&zero[0].search_url);
        assert!(url.contains("#Errands"), "{url}");
        assert!(!url.contains('@'), "{url}");
    } else {
        assert!(zero.is_empty());
    }
}

#[rstest]
#[case::custom_label("waiting", 1)]
#[case::zero_limit("next_action", 0)]
fn marker_label_and_limit_are_configurable(#[case] label: &str, #[case] limit: usize) {
    let projects = vec![project("1", "Work")];
    let tasks = vec![
        task("a", "1", &[label]),
        task("b", "1", &[label, "other"]),
    ];
    let rules = LimitRules {
        marker_label: label.to_string(),
        limit,
        ..LimitRules::default()
    };

    let (too_many, _) = find_over_and_under_limit_projects(&tasks, &projects, &rules);

    assert_eq!(too_many.len(), 1);
    assert_eq!(too_many[0].task_count, 2);
    assert!(decoded(&too_many[0].search_url).contains(&format!("@{label}")));
}

#[test]
fn every_project_lands_in_at_most_one_partition() {
    let projects: Vec<_> = (1..=6)
        .map(|i| project(&i.to_string(), &format!("P{i}")))
        .collect();
    // P1: 5 marked, P2: 3 marked, P3: 1 marked, P4..P6: none
    let mut tasks = Vec::new();
    for (project_id, marked) in [("1", 5), ("2", 3), ("3", 1)] {
        for i in 0..marked {
            tasks.push(task(&format!("{project_id}-{i}"), project_id, &["next_action"]));
        }
    }
    tasks.push(task("u", "4", &["someday"]));
    tasks.push(task("orphan", "99", &["next_action"]));

    let (too_many, zero) =
        find_over_and_under_limit_projects(&tasks, &projects, &LimitRules::default());

    let over: BTreeSet<_> = too_many.iter().map(|e| e.project_name.clone()).collect();
    let empty: BTreeSet<_> = zero.iter().map(|e| e.project_name.clone()).collect();
    assert!(over.is_disjoint(&empty));
    assert_eq!(over, BTreeSet::from(["P1".to_string()]));
    assert_eq!(
        empty,
        BTreeSet::from(["P4".to_string(), "P5".to_string(), "P6".to_string()])
    );
}

#[rstest]
#[case::older_and_low(Duration::hours(73), 1, true)]
#[case::exactly_at_threshold(Duration::hours(72), 1, false)]
#[case::younger(Duration::hours(71), 1, false)]
#[case::at_ceiling(Duration::hours(200), 3, false)]
#[case::above_ceiling(Duration::hours(200), 4, false)]
#[case::just_under_ceiling(Duration::hours(200), 2, true)]
fn staleness_uses_strict_inequalities(
    #[case] age: Duration,
    #[case] priority: i32,
    #[case] selected: bool,
) {
    let tasks = vec![aged("t", age, priority)];
    let stale = find_stale_low_priority_tasks(&tasks, Duration::hours(72), 3, now());
    assert_eq!(stale.len(), usize::from(selected));
}

#[test]
fn high_priority_tasks_never_go_stale() {
    let tasks: Vec<_> = (0..50)
        .map(|days| aged(&days.to_string(), Duration::days(days), 3 + (days as i32 % 2)))
        .collect();
    let stale = find_stale_low_priority_tasks(&tasks, Duration::zero(), 3, now());
    assert!(stale.is_empty());
}
