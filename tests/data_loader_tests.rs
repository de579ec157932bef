use approx::assert_relative_eq;
use chrono::NaiveDate;
use classroom_charts::ChartError;
use classroom_charts::data::{
    load_trials, read_csv_rows, read_disasters, read_leaders, read_trials,
};

#[test]
fn raw_rows_are_keyed_by_trimmed_headers() {
    let rows = read_csv_rows(" trial , accuracy\n1,0.5\n".as_bytes()).expect("csv rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("trial"), Some("1"));
    assert_eq!(rows[0].get("accuracy"), Some("0.5"));
    assert!(rows[0].number("missing").is_nan());
}

#[test]
fn trial_coercion_follows_unary_plus() {
    let csv = "trial,accuracy,difficulty\n1,0.75,easy\n2,,hard\nx,0.5,\n";
    let trials = read_trials(csv.as_bytes()).expect("trials");

    assert_eq!(trials.len(), 3);
    assert_relative_eq!(trials[0].accuracy, 0.75);
    assert_eq!(trials[0].difficulty.as_deref(), Some("easy"));
    assert_relative_eq!(trials[1].accuracy, 0.0);
    assert!(trials[2].trial.is_nan());
    assert_eq!(trials[2].difficulty, None);
}

#[test]
fn disaster_calendar_fields_derive_from_mid_date() {
    let csv = "mid,year,cost,category,name\n\
               2017-03-01,2017,1.5,severe-storm,Spring Storms\n\
               1980-01-01,1980,20,drought-wildfire,Drought\n\
               unknown,1999,3,flooding,Floods\n";
    let disasters = read_disasters(csv.as_bytes()).expect("disasters");

    let storm = &disasters[0];
    assert_eq!(storm.date, NaiveDate::from_ymd_opt(2017, 3, 1));
    assert_relative_eq!(storm.day_of_year, 59.0);
    assert_eq!(storm.month, Some(2));
    assert_relative_eq!(storm.cost, 1.5);

    assert_relative_eq!(disasters[1].day_of_year, 0.0);
    assert_eq!(disasters[1].month, Some(0));

    assert_eq!(disasters[2].date, None);
    assert!(disasters[2].day_of_year.is_nan());
    assert_eq!(disasters[2].month, None);
}

#[test]
fn leader_columns_are_typed_and_sorted_by_label() {
    let csv = "start_year,end_year,start_age,end_age,gender,country,leader,duration,pcgdp,oecd,eu27,label,id\n\
               2000,2005,50,55,male,Canada,Highlighted,5,45000,1,0,1,7\n\
               1990,1994,60,64,female,Chile,Plain,4,NA,1,0,0,3\n";
    let leaders = read_leaders(csv.as_bytes()).expect("leaders");

    assert_eq!(leaders.len(), 2);
    let plain = &leaders[0];
    assert_eq!(plain.leader, "Plain");
    assert_eq!(plain.id, Some(3));
    assert_eq!(plain.pcgdp, None);
    assert_eq!(plain.country, "Chile");
    assert!(plain.is_member_of("oecd"));
    assert!(!plain.is_member_of("eu27"));
    assert!(!plain.is_highlighted());

    let highlighted = &leaders[1];
    assert_eq!(highlighted.pcgdp, Some(45000.0));
    assert!(highlighted.is_highlighted());
    assert_relative_eq!(highlighted.duration, 5.0);
    assert_eq!(
        highlighted.memberships.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["oecd", "eu27"]
    );
}

#[test]
fn missing_resource_is_an_io_error() {
    let err = load_trials("does/not/exist.csv").expect_err("missing file must fail");
    assert!(matches!(err, ChartError::Io(_)));
}
