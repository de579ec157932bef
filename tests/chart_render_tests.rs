use std::rc::Rc;

use approx::assert_relative_eq;
use classroom_charts::api::DashboardSnapshot;
use classroom_charts::charts::{DISASTER_CATEGORIES, DisasterTimeline, TrialScatterplot};
use classroom_charts::core::Margin;
use classroom_charts::data::{DisasterRecord, TrialRecord};
use classroom_charts::render::{Mark, MarkKey, MarkShape};
use classroom_charts::{
    Chart, ChartConfig, ChartError, DisasterTimelineView, FilterIntent, FilterState, MarkState,
    TrialsView, ViewId,
};

fn trials() -> Vec<TrialRecord> {
    vec![
        TrialRecord::new(3.0, 0.9).with_difficulty("hard"),
        TrialRecord::new(1.0, 0.2).with_difficulty("easy"),
        TrialRecord::new(2.0, 0.5).with_difficulty("hard"),
        TrialRecord::new(1.0, 0.4).with_difficulty("easy"),
    ]
}

fn disasters() -> Vec<DisasterRecord> {
    vec![
        DisasterRecord::new("2017-03-01", 2017.0, 5.0, "severe-storm", "First"),
        DisasterRecord::new("2017-09-10", 2017.0, 5.0, "tropical-cyclone", "Second"),
        DisasterRecord::new("2017-01-15", 2017.0, 1.2, "winter-storm-freeze", "Cold Snap"),
        DisasterRecord::new("1980-06-01", 1980.0, 33.0, "drought-wildfire", "Heat Wave"),
    ]
}

fn center(mark: &Mark) -> (f64, f64) {
    match mark.shape {
        MarkShape::Circle { cx, cy, .. } => (cx, cy),
        MarkShape::Rect {
            x,
            y,
            width,
            height,
        } => (x + width / 2.0, y + height / 2.0),
        MarkShape::HalfDisc { cx, cy, radius } => (cx, cy - radius / 2.0),
        MarkShape::Arrow { x1, y1, x2, y2 } => ((x1 + x2) / 2.0, (y1 + y2) / 2.0),
    }
}

#[test]
fn trial_rows_are_sorted_and_evenly_spaced() {
    let data: Rc<[TrialRecord]> = trials().into();
    let mut chart = TrialScatterplot::new(TrialScatterplot::default_config(), data)
        .expect("trial chart");
    chart.refresh(&FilterState::new());

    assert_eq!(chart.trial_domain().collect::<Vec<_>>(), vec![1.0, 2.0, 3.0]);
    assert_relative_eq!(chart.slot_position(1.0).expect("slot"), 40.0);
    assert_relative_eq!(chart.slot_position(2.0).expect("slot"), 40.0 + 200.0 / 3.0);
    assert_relative_eq!(chart.slot_position(3.0).expect("slot"), 40.0 + 400.0 / 3.0);
    assert_eq!(chart.slot_position(4.0), None);

    let first = chart.frame().mark(&MarkKey::Index(1)).expect("trial 1 mark");
    match first.shape {
        MarkShape::Circle { cy, r, .. } => {
            assert_relative_eq!(cy, 20.0 + 40.0);
            assert_relative_eq!(r, 8.0);
        }
        other => panic!("unexpected shape {other:?}"),
    }

    let means: Vec<(f64, f64)> = chart.means().iter().map(|m| (m.trial, m.mean)).collect();
    assert_eq!(means.len(), 3);
    assert_relative_eq!(means[0].1, 0.3, epsilon = 1e-12);
    assert_relative_eq!(means[2].1, 0.9);
    assert!(chart.frame().texts.iter().any(|text| text.text == "0.30"));
}

#[test]
fn second_render_without_changes_is_a_noop() {
    let data: Rc<[TrialRecord]> = trials().into();
    let mut chart = TrialScatterplot::new(TrialScatterplot::default_config(), data)
        .expect("trial chart");
    let filter = FilterState::new();

    let first = chart.refresh(&filter);
    assert_eq!(first.entered.len(), 4);
    let marks = chart.frame().marks.clone();

    let second = chart.render_vis(&filter);
    assert!(second.is_noop());
    assert_eq!(chart.frame().marks, marks);
}

#[test]
fn legend_filter_removes_and_restores_trial_marks() {
    let mut view = TrialsView::new(trials()).expect("trials view");
    let initial = view.frame().marks.clone();
    assert_eq!(initial.len(), 4);

    view.apply(FilterIntent::ToggleCategory("hard".to_owned()));
    let keys: Vec<&MarkKey> = view.frame().marks.iter().map(|mark| &mark.key).collect();
    assert_eq!(keys, vec![&MarkKey::Index(1), &MarkKey::Index(3)]);
    assert_eq!(view.chart().means().len(), 1);

    view.apply(FilterIntent::ToggleCategory("hard".to_owned()));
    assert_eq!(view.frame().marks, initial);
}

#[test]
fn trial_tooltip_reports_accuracy() {
    let mut view = TrialsView::new(trials()).expect("trials view");
    let mark = view.frame().mark(&MarkKey::Index(0)).expect("mark").clone();
    let (x, y) = center(&mark);

    let tooltip = view.hover(x, y).expect("tooltip over a trial point");
    assert_eq!(tooltip.title, "Trial 3");
    assert_eq!(tooltip.lines, vec!["Accuracy: 0.90".to_owned()]);
    assert_relative_eq!(tooltip.left, x + 15.0);
    assert!(view.leave());
    assert!(!view.leave());
}

#[test]
fn too_small_container_is_rejected() {
    let config = ChartConfig::new("#vis", 60, 30, Margin::new(20.0, 40.0, 20.0, 40.0));
    let data: Rc<[TrialRecord]> = trials().into();
    let err = TrialScatterplot::new(config, data).expect_err("no room for a plot");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn costliest_label_prefers_first_record_on_ties() {
    let data: Rc<[DisasterRecord]> = disasters().into();
    let mut chart =
        DisasterTimeline::new(DisasterTimeline::default_config(), data).expect("timeline");
    chart.refresh(&FilterState::new());

    let groups = chart.groups();
    assert_eq!(groups.len(), 2);
    assert_relative_eq!(groups[0].year, 2017.0);
    assert_eq!(groups[0].costliest, Some(0));
    assert_eq!(groups[0].max_cost, Some(5.0));
    assert_eq!(groups[1].records, vec![3]);

    let labels: Vec<&str> = chart
        .frame()
        .texts
        .iter()
        .filter(|text| text.class.as_deref() == Some("h-label"))
        .map(|text| text.text.as_str())
        .collect();
    assert_eq!(labels, vec!["First", "Heat Wave"]);
}

#[test]
fn timeline_radius_uses_square_root_of_cost() {
    let data: Rc<[DisasterRecord]> = disasters().into();
    let chart = DisasterTimeline::new(DisasterTimeline::default_config(), data).expect("timeline");
    assert_relative_eq!(chart.radius(1.2), 4.0);
    assert_relative_eq!(chart.radius(33.0), 140.0);
    assert!(chart.radius(5.0) > 4.0 && chart.radius(5.0) < 140.0);
}

#[test]
fn empty_category_set_renders_like_all_categories() {
    let data: Rc<[DisasterRecord]> = disasters().into();
    let mut chart =
        DisasterTimeline::new(DisasterTimeline::default_config(), data).expect("timeline");

    chart.refresh(&FilterState::new());
    let with_empty = chart.frame().marks.clone();
    chart.refresh(&FilterState::with_categories(DISASTER_CATEGORIES));
    assert_eq!(chart.frame().marks, with_empty);
    assert_eq!(chart.active_mark_count(), 4);
}

#[test]
fn off_legend_category_is_unaffected_by_emptying_the_legend() {
    let mut records = disasters();
    records.push(DisasterRecord::new("2017-05-20", 2017.0, 50.0, "other", "Mystery"));
    let mut view = DisasterTimelineView::new(records).expect("timeline view");
    let h_labels = |view: &DisasterTimelineView| -> Vec<String> {
        view.frame()
            .texts
            .iter()
            .filter(|text| text.class.as_deref() == Some("h-label"))
            .map(|text| text.text.clone())
            .collect()
    };

    let initial_marks = view.frame().marks.clone();
    let initial_labels = h_labels(&view);
    assert_eq!(view.chart().active_mark_count(), 5);
    assert!(initial_labels.contains(&"Mystery".to_owned()));

    for category in DISASTER_CATEGORIES {
        view.apply(FilterIntent::ToggleCategory(category.to_owned()));
    }
    assert!(view.filter().active_categories().is_empty());
    assert_eq!(view.chart().active_mark_count(), 5);
    assert_eq!(h_labels(&view), initial_labels);
    assert_eq!(view.frame().marks, initial_marks);
}

#[test]
fn legend_click_toggles_category_round_trip() {
    let mut view = DisasterTimelineView::new(disasters()).expect("timeline view");
    let initial = view.frame().marks.clone();
    let legend_mark = view
        .frame()
        .mark(&MarkKey::Category("winter-storm-freeze".to_owned()))
        .expect("legend entry")
        .clone();
    let (x, y) = center(&legend_mark);

    let plan = view.click(x, y);
    assert!(!plan.is_none());
    assert!(!view.filter().is_category_active("winter-storm-freeze"));
    assert_eq!(view.chart().active_mark_count(), 3);
    let legend_state = view
        .frame()
        .mark(&MarkKey::Category("winter-storm-freeze".to_owned()))
        .map(|mark| mark.state);
    assert_eq!(legend_state, Some(MarkState::Inactive));

    view.click(x, y);
    assert_eq!(view.frame().marks, initial);
}

#[test]
fn timeline_tooltip_shows_cost_in_billions() {
    let mut view = DisasterTimelineView::new(disasters()).expect("timeline view");
    let mark = view.frame().mark(&MarkKey::Index(3)).expect("mark").clone();
    let (x, y) = center(&mark);

    let tooltip = view.hover(x, y).expect("tooltip");
    assert_eq!(tooltip.title, "Heat Wave");
    assert_eq!(tooltip.lines, vec!["$33 billion".to_owned()]);
}

#[test]
fn snapshot_with_missing_accuracy_reads_back() {
    let mut records = trials();
    records.push(TrialRecord::new(2.0, f64::NAN).with_difficulty("hard"));
    let view = TrialsView::new(records).expect("trials view");
    let broken = view.frame().mark(&MarkKey::Index(4)).expect("nan mark");
    assert!(!broken.is_renderable());

    let json = view.snapshot().to_json_contract_v1_pretty().expect("serialize");
    let restored = DashboardSnapshot::from_json_compat_str(&json).expect("parse snapshot with nan");
    let frame = &restored.view(ViewId::Trials).expect("trials view").frame;
    assert_eq!(frame.marks.len(), view.frame().marks.len());
    let restored_mark = frame.mark(&MarkKey::Index(4)).expect("restored nan mark");
    assert!(!restored_mark.is_renderable());
    assert_eq!(restored_mark.state, broken.state);
    assert_eq!(frame.renderable_marks().count(), view.frame().renderable_marks().count());
    assert_eq!(restored.filter, *view.filter());
}
