use classroom_charts::data::{LeaderRecord, TrialRecord};
use classroom_charts::filter::{
    FilterIntent, FilterState, FilterTopic, GenderFilter, MarkState, classify, partition,
};

fn ids(group: &[&LeaderRecord]) -> Vec<i64> {
    group.iter().filter_map(|record| record.id).collect()
}

fn leaders() -> Vec<LeaderRecord> {
    vec![
        LeaderRecord::new(1, "Ada", "female"),
        LeaderRecord::new(2, "Ben", "male"),
        LeaderRecord::new(3, "Cleo", "female"),
    ]
}

#[test]
fn empty_category_set_means_all_active() {
    let state = FilterState::new();
    let record = TrialRecord::new(1.0, 0.5).with_difficulty("hard");
    assert!(state.is_category_active("hard"));
    assert_eq!(classify(&record, &state), MarkState::Active);
}

#[test]
fn legend_toggle_round_trip_restores_state() {
    let initial = FilterState::with_categories(["easy", "hard"]);
    let mut state = initial.clone();

    assert!(state.apply(&FilterIntent::ToggleCategory("hard".to_owned())));
    assert!(!state.is_category_active("hard"));
    assert!(state.is_category_active("easy"));

    assert!(state.apply(&FilterIntent::ToggleCategory("hard".to_owned())));
    assert_eq!(state, initial);
}

#[test]
fn deactivating_every_category_falls_back_to_all() {
    let mut state = FilterState::with_categories(["easy"]);
    state.apply(&FilterIntent::ToggleCategory("easy".to_owned()));
    assert!(state.active_categories().is_empty());
    assert!(state.is_category_active("easy"));
    assert!(state.is_category_active("anything"));
}

#[test]
fn category_outside_legend_passes_in_every_legend_state() {
    let stray = TrialRecord::new(1.0, 0.5).with_difficulty("unrated");
    let mut state = FilterState::with_categories(["easy", "hard"]);
    assert_eq!(classify(&stray, &state), MarkState::Active);

    state.apply(&FilterIntent::ToggleCategory("easy".to_owned()));
    assert_eq!(classify(&stray, &state), MarkState::Active);

    state.apply(&FilterIntent::ToggleCategory("hard".to_owned()));
    assert!(state.active_categories().is_empty());
    assert_eq!(classify(&stray, &state), MarkState::Active);
}

#[test]
fn gender_toggle_switches_against_no_filter() {
    let mut state = FilterState::new();
    state.apply(&FilterIntent::ToggleGender("female".to_owned()));
    assert_eq!(state.gender(), &GenderFilter::Only("female".to_owned()));

    state.apply(&FilterIntent::ToggleGender("male".to_owned()));
    assert_eq!(state.gender().selected(), Some("male"));

    state.apply(&FilterIntent::ToggleGender("male".to_owned()));
    assert_eq!(state.gender(), &GenderFilter::Any);
    assert!(!state.apply(&FilterIntent::ResetGender));
}

#[test]
fn selection_toggles_membership() {
    let mut state = FilterState::new();
    state.apply(&FilterIntent::ToggleSelection(4));
    state.apply(&FilterIntent::ToggleSelection(9));
    assert_eq!(state.selected_ids(), [4, 9]);

    state.apply(&FilterIntent::ToggleSelection(4));
    assert_eq!(state.selected_ids(), [9]);

    assert!(state.apply(&FilterIntent::ClearSelection));
    assert!(!state.apply(&FilterIntent::ClearSelection));
}

#[test]
fn classify_gives_selection_precedence_over_filters() {
    let records = leaders();
    let mut state = FilterState::new();
    state.apply(&FilterIntent::ToggleGender("female".to_owned()));
    state.apply(&FilterIntent::ToggleSelection(2));

    assert_eq!(classify(&records[0], &state), MarkState::Active);
    assert_eq!(classify(&records[1], &state), MarkState::Selected);

    state.apply(&FilterIntent::ToggleSelection(2));
    assert_eq!(classify(&records[1], &state), MarkState::Inactive);
}

#[test]
fn partition_splits_records_by_state() {
    let records = leaders();
    let mut state = FilterState::new();
    state.apply(&FilterIntent::ToggleGender("female".to_owned()));
    state.apply(&FilterIntent::ToggleSelection(3));

    let split = partition(&records, &state);
    assert_eq!(ids(&split.selected), vec![3]);
    assert_eq!(ids(&split.active), vec![1]);
    assert_eq!(ids(&split.inactive), vec![2]);
}

#[test]
fn intents_report_their_topic() {
    assert_eq!(FilterIntent::ToggleCategory("a".to_owned()).topic(), FilterTopic::Category);
    assert_eq!(FilterIntent::ResetGender.topic(), FilterTopic::Gender);
    assert_eq!(FilterIntent::ClearSelection.topic(), FilterTopic::Selection);
}
