use chrono::NaiveDate;
use cronograma::analysis::CategoryOrder;
use cronograma::model::category::{FALLBACK_CATEGORY, PREPARACAO};
use cronograma::model::{InputFormat, ScheduleHealthCounts};
use cronograma::{run, Error, PipelineOptions};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn options() -> PipelineOptions {
    PipelineOptions::new(day(2025, 1, 1))
}

const HEADER: &str = "ID,Nome da tarefa,% Complete,Physical % Complete,% Previsto Replanejamento,\
Duration,Start,Finish,Actual Start,Actual Finish,Predecessors,Baseline Start,Baseline Finish";

fn named(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

/// A fixed-position export of a kiln shutdown, header included.
const FIXED: &str = "\
ID;Task name;% Complete;Physical % Complete;% Previsto Replanejamento;Duration;Start;Finish;Actual Start;Actual Finish;Predecessors;Baseline Start;Baseline Finish;% Físico Prev. LB;% Físico Prev. Replanejado;% Físico Calculado
0;Parada PFUS3;35%;30%;40%;40 days;2024-12-10;2025-01-21;2024-12-10;NA;;2024-12-10;2025-01-21;0,4;0,45;0,35
1;    Logística;60%;55%;60%;20 days;2024-12-10;2024-12-30;2024-12-10;NA;;2024-12-10;2025-01-05;0,6;0,6;0,55
2;        Montagem de guindaste;100%;100%;100%;3 days;2024-12-10;2024-12-13;2024-12-10;2024-12-13;;2024-12-10;2024-12-13;1;1;1
3;        Acessos ao forno;20%;20%;20%;10 days;2024-12-20;2025-01-03;2024-12-20;NA;2;2024-12-20;2025-01-05;0,3;0,3;0,2
4;    Refratário;10%;10%;10%;15 days;2024-12-20;2025-01-12;2024-12-20;NA;1;2024-12-20;2025-01-10;0,2;0,2;0,1
5;        \"Demolição, zona de queima\";0%;0%;0%;5 days;2025-01-02;2024-12-31;NA;NA;4;2025-01-02;2024-12-31;0;0;0
6;    Moagem de cru;0%;0%;0%;5 days;2025-01-15;2025-01-20;NA;NA;;2025-01-15;2025-01-25;0;0;0
7;    Reunião de encerramento;0%;0%;0%;1 day;2025-01-21;2025-01-21;NA;NA;;2025-01-21;2025-01-21;0;0;0
8;Indicators
";

#[test]
fn electrical_parent_and_completed_child() {
    let text = named(&[
        "1,Elétrica Geral,50%,50%,50%,10 days,2025-01-01,2025-01-11,2025-01-01,NA,,2025-01-01,2025-01-11",
        "2,    Subtarefa Elétrica,100%,100%,100%,2 days,2025-01-01,2025-01-03,2025-01-01,2025-01-03,,2025-01-01,2025-01-03",
    ]);
    let schedule = run(&text, &options()).unwrap();

    assert_eq!(schedule.format, InputFormat::Named);
    assert_eq!(schedule.summary.total_tasks, 2);
    let child = schedule.forest.get(2).unwrap();
    assert_eq!(child.parent_id, Some(1));
    assert_eq!(child.level, 1);
    assert_eq!(schedule.forest.get(1).unwrap().children, vec![2]);

    assert_eq!(schedule.categories.len(), 1);
    let electrical = &schedule.categories[0];
    assert_eq!(electrical.name, "Elétrica");
    assert!(electrical.tasks.iter().all(|t| t.category == "Elétrica"));
    assert_eq!(electrical.average_progress, 75.0);
    // The completed child is not classified.
    assert_eq!(
        electrical.schedule_health,
        ScheduleHealthCounts {
            on_time: 1,
            ..Default::default()
        }
    );
    assert_eq!(schedule.summary.schedule_health.total(), 1);
}

#[test]
fn whitespace_only_name_is_skipped() {
    let text = named(&[
        "1,Canteiro central,10%,,,,,,,,,,",
        "2,      ,50%,,,,,,,,,,",
        "3,    Canteiro oficina,30%,,,,,,,,,,",
    ]);
    let schedule = run(&text, &options()).unwrap();
    assert_eq!(schedule.summary.total_tasks, 2);
    assert_eq!(schedule.skipped_rows, 1);
    assert!(schedule.forest.get(2).is_none());
}

#[test]
fn remaining_days_from_root_finish() {
    let text = named(&[
        "0,Parada geral,20%,,,,2024-12-01,2025-01-11,,,,2024-12-01,2025-01-11",
        "1,    Mobilização,100%,,,,2024-12-01,2024-12-05,,,,2024-12-01,2024-12-05",
    ]);
    let schedule = run(&text, &options()).unwrap();
    assert_eq!(schedule.summary.remaining_days, 10);
    assert_eq!(schedule.summary.projected_completion_date, "11/01/2025");
    assert_eq!(schedule.summary.overall_progress, 20.0);
}

#[test]
fn tolerant_percent_and_garbage_dates() {
    let text = named(&["1,Bogiflex,\"57,3%\",,,,,lixo,,,,,???"]);
    let schedule = run(&text, &options()).unwrap();
    let task = schedule.forest.get(1).unwrap();
    assert!((task.completion_percent - 57.3).abs() < 1e-9);
    assert_eq!(schedule.summary.schedule_health.on_time, 1);
    assert!(schedule.warnings.iter().any(|w| w.field == "finish"));
}

#[test]
fn fixed_position_export() {
    let schedule = run(FIXED, &options()).unwrap();

    assert_eq!(schedule.format, InputFormat::Fixed);
    assert_eq!(schedule.summary.total_tasks, 8);
    // The footer row has too few fields.
    assert_eq!(schedule.skipped_rows, 1);

    let names: Vec<_> = schedule.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Logística", "Refratário", PREPARACAO, FALLBACK_CATEGORY]);

    let refractory = schedule.category("Refratário").unwrap();
    let demolition = refractory.tasks.iter().find(|t| t.id == 5).unwrap();
    assert_eq!(demolition.name, "Demolição, zona de queima");
    assert_eq!(demolition.parent_id, Some(4));

    // Root 0 is the project: its progress and finish drive the summary.
    assert_eq!(schedule.summary.overall_progress, 35.0);
    assert_eq!(schedule.summary.remaining_days, 20);

    let summary = &schedule.summary;
    assert_eq!(summary.completed_tasks, 1);
    assert_eq!(summary.pending_tasks, 3);
    assert_eq!(summary.in_progress_tasks, 4);

    // Reference 2025-01-01:
    //   0 finish 01-21 = baseline           -> on time
    //   1 finish 12-30 < reference          -> late
    //   3 finish 01-03, 2 days left         -> at risk
    //   4 finish 01-12 > baseline 01-10     -> late
    //   5 finish 12-31 < reference          -> late
    //   6 finish 01-20 < baseline 01-25     -> ahead
    //   7 finish 01-21 = baseline           -> on time
    assert_eq!(
        summary.schedule_health,
        ScheduleHealthCounts {
            on_time: 2,
            late: 3,
            ahead: 1,
            at_risk: 1,
        }
    );
}

#[test]
fn properties_hold_for_fixed_export() {
    let schedule = run(FIXED, &options()).unwrap();
    let summary = &schedule.summary;

    assert_eq!(
        summary.completed_tasks + summary.in_progress_tasks + summary.pending_tasks,
        summary.total_tasks
    );

    for task in schedule.forest.tasks() {
        if let Some(pid) = task.parent_id {
            let parent = schedule.forest.get(pid).expect("parent exists");
            assert_eq!(parent.level + 1, task.level);
            assert!(parent.children.contains(&task.id));
        }
    }

    let mut member_ids: Vec<_> = schedule
        .categories
        .iter()
        .flat_map(|c| c.tasks.iter().map(|t| t.id))
        .collect();
    member_ids.sort_unstable();
    let all_ids: Vec<_> = schedule.forest.tasks().iter().map(|t| t.id).collect();
    assert_eq!(member_ids, all_ids);

    let per_category: ScheduleHealthCounts =
        schedule.categories.iter().map(|c| c.schedule_health).sum();
    assert_eq!(per_category, summary.schedule_health);
}

#[test]
fn importing_twice_is_idempotent() {
    let a = run(FIXED, &options()).unwrap();
    let b = run(FIXED, &options()).unwrap();
    assert_eq!(a.categories, b.categories);
    assert_eq!(a.summary, b.summary);
    assert_eq!(a.forest, b.forest);
}

#[test]
fn category_order_can_be_forced() {
    let mut opts = options();
    opts.order = Some(CategoryOrder::Alphabetical);
    let schedule = run(FIXED, &opts).unwrap();
    let names: Vec<_> = schedule.categories.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

#[test]
fn garbage_id_colliding_with_a_real_id_keeps_the_forest_acyclic() {
    let text = "ID,Nome da tarefa,% Complete\nx,Elétrica,10%\n1,    Painel,0%\n";
    let schedule = run(text, &options()).unwrap();

    let mut ids: Vec<_> = schedule.forest.tasks().iter().map(|t| t.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 2);
    for task in schedule.forest.tasks() {
        assert_ne!(task.parent_id, Some(task.id));
        assert!(!task.children.contains(&task.id));
    }
    assert_eq!(schedule.forest.walk().len(), 2);
}

#[test]
fn overdue_task_without_baseline_is_late() {
    let text = "ID,Nome da tarefa,% Complete,Finish\n\
                1,Montagem de guindaste,40%,2024-12-20\n\
                2,Trilho de rolamento,10%,2025-01-03\n";
    let schedule = run(text, &options()).unwrap();
    assert_eq!(
        schedule.summary.schedule_health,
        ScheduleHealthCounts {
            late: 1,
            at_risk: 1,
            ..Default::default()
        }
    );
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(run("", &options()), Err(Error::EmptyInput)));
    assert!(matches!(run("\n\n", &options()), Err(Error::EmptyInput)));
    let mut forced = options();
    forced.import.format = Some(InputFormat::Named);
    assert!(matches!(run("", &forced), Err(Error::EmptyInput)));
    assert!(matches!(
        run(&named(&[",   ,"]), &options()),
        Err(Error::NoUsableRows { skipped: 1 })
    ));
}
