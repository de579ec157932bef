use approx::assert_relative_eq;
use classroom_charts::core::{count_by, extent, group_by, max, max_by_first, mean, rollup, sum};
use classroom_charts::data::{DisasterRecord, TrialRecord};
use ordered_float::OrderedFloat;

#[test]
fn per_trial_mean_matches_worked_example() {
    let records = [
        TrialRecord::new(1.0, 0.5),
        TrialRecord::new(1.0, 0.7),
        TrialRecord::new(2.0, 0.9),
    ];

    let means = rollup(
        &records,
        |record| OrderedFloat(record.trial),
        |members: &[&TrialRecord]| mean(members, |record| record.accuracy),
    );

    assert_eq!(means.len(), 2);
    assert_relative_eq!(
        means[&OrderedFloat(1.0)].expect("trial 1 mean"),
        0.6,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        means[&OrderedFloat(2.0)].expect("trial 2 mean"),
        0.9,
        epsilon = 1e-12
    );
}

#[test]
fn groups_keep_first_appearance_order() {
    let values = [3, 1, 3, 2, 1];
    let groups = group_by(&values, |value| *value);
    let keys: Vec<i32> = groups.keys().copied().collect();
    assert_eq!(keys, vec![3, 1, 2]);
    assert_eq!(groups[&3].len(), 2);

    let counts = count_by(&["male", "female", "male"], |gender| gender.to_string());
    assert_eq!(counts.get("male"), Some(&2));
    assert_eq!(counts.get_index(1), Some((&"female".to_owned(), &1)));
}

#[test]
fn reductions_skip_nan() {
    let values = [1.0, f64::NAN, 4.0];
    let refs: Vec<&f64> = values.iter().collect();
    assert_relative_eq!(sum(&refs, |v| *v), 5.0);
    assert_relative_eq!(mean(&refs, |v| *v).expect("mean"), 2.5);
    assert_relative_eq!(max(&refs, |v| *v).expect("max"), 4.0);
    assert_eq!(extent(&values, |v| *v), Some((1.0, 4.0)));

    let empty: Vec<&f64> = Vec::new();
    assert_eq!(mean(&empty, |v| *v), None);
    assert_eq!(max(&empty, |v| *v), None);
}

#[test]
fn max_cost_per_year_takes_first_match_on_ties() {
    let records = [
        DisasterRecord::new("1990-03-01", 1990.0, 5.0, "flooding", "first"),
        DisasterRecord::new("1990-06-01", 1990.0, 5.0, "severe-storm", "second"),
        DisasterRecord::new("1990-09-01", 1990.0, 2.0, "drought-wildfire", "third"),
        DisasterRecord::new("1991-01-10", 1991.0, f64::NAN, "flooding", "broken"),
        DisasterRecord::new("1991-02-10", 1991.0, 1.5, "flooding", "only"),
    ];

    let groups = group_by(&records, |record| OrderedFloat(record.year));
    let costliest: Vec<&str> = groups
        .values()
        .map(|members| {
            max_by_first(members, |record| record.cost)
                .map(|record| record.name.as_str())
                .expect("group maximum")
        })
        .collect();

    assert_eq!(costliest, vec!["first", "only"]);
}
