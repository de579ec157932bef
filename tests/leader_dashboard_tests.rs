use std::cell::RefCell;
use std::rc::Rc;

use classroom_charts::api::{
    DashboardEvent, DashboardObserver, DashboardSnapshot, InvalidationLevel, InvalidationPlan,
    plan_for,
};
use classroom_charts::data::LeaderRecord;
use classroom_charts::filter::{FilterTopic, GenderFilter};
use classroom_charts::render::{Color, Mark, MarkKey, MarkShape, NullRenderer, SvgRenderer};
use classroom_charts::{Chart, FilterIntent, FilterState, LeaderDashboard, MarkState, ViewId};

fn leaders() -> Vec<LeaderRecord> {
    vec![
        LeaderRecord::new(1, "A", "male")
            .with_country("Y")
            .with_tenure(1990.0, 1995.0)
            .with_ages(50.0, 55.0)
            .with_duration(5.0)
            .with_pcgdp(Some(30_000.0))
            .with_membership("oecd", 1.0)
            .with_membership("eu27", 0.0),
        LeaderRecord::new(2, "B", "female")
            .with_country("X")
            .with_tenure(2000.0, 2004.0)
            .with_ages(45.0, 49.0)
            .with_duration(4.0)
            .with_pcgdp(Some(40_000.0))
            .with_membership("oecd", 1.0)
            .with_membership("eu27", 0.0),
        LeaderRecord::new(3, "C", "male")
            .with_tenure(2010.0, 2010.0)
            .with_ages(60.0, 60.0)
            .with_duration(0.0)
            .with_pcgdp(Some(10_000.0))
            .with_membership("oecd", 1.0)
            .with_membership("eu27", 0.0),
        LeaderRecord::new(4, "D", "female")
            .with_tenure(1980.0, 1990.0)
            .with_ages(60.0, 70.0)
            .with_duration(10.0)
            .with_pcgdp(None)
            .with_membership("oecd", 0.0)
            .with_membership("eu27", 1.0),
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

fn mark_at(dashboard: &LeaderDashboard, view: ViewId, key: &MarkKey) -> (f64, f64) {
    let mark = dashboard
        .frame(view)
        .and_then(|frame| frame.mark(key))
        .expect("mark is rendered");
    center(mark)
}

fn state_of(dashboard: &LeaderDashboard, view: ViewId, key: &MarkKey) -> Option<MarkState> {
    dashboard
        .frame(view)
        .and_then(|frame| frame.mark(key))
        .map(|mark| mark.state)
}

struct Recorder {
    events: Rc<RefCell<Vec<DashboardEvent>>>,
}

impl DashboardObserver for Recorder {
    fn id(&self) -> &str {
        "recorder"
    }

    fn on_event(&mut self, event: &DashboardEvent, _filter: &FilterState) {
        self.events.borrow_mut().push(event.clone());
    }
}

#[test]
fn default_group_keeps_positive_tenures_and_splits_gdp() {
    let dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    assert_eq!(dashboard.group(), "oecd");

    let ids = |data: &[LeaderRecord]| data.iter().filter_map(|r| r.id).collect::<Vec<_>>();
    assert_eq!(ids(dashboard.bar_chart().data()), vec![1, 2]);
    assert_eq!(ids(dashboard.scatterplot().data()), vec![1, 2]);
    assert_eq!(ids(dashboard.lexis().data()), vec![1, 2]);

    let counts: Vec<(&str, usize)> = dashboard
        .bar_chart()
        .counts()
        .iter()
        .map(|entry| (entry.gender.as_str(), entry.count))
        .collect();
    assert_eq!(counts, vec![("male", 1), ("female", 1)]);
    assert_eq!(dashboard.scatterplot().x_scale().domain(), (0.0, 40_000.0));
}

#[test]
fn gender_plan_refreshes_every_consumer() {
    let plan = plan_for(FilterTopic::Gender);
    assert_eq!(plan.level(ViewId::Scatterplot), InvalidationLevel::Full);
    assert_eq!(plan.level(ViewId::Lexis), InvalidationLevel::Full);
    assert_eq!(plan.level(ViewId::BarChart), InvalidationLevel::Render);

    let plan = plan_for(FilterTopic::Selection);
    assert_eq!(plan.level(ViewId::BarChart), InvalidationLevel::None);
    assert_eq!(plan.level(ViewId::Lexis), InvalidationLevel::Render);
    assert!(plan_for(FilterTopic::Category).is_none());
}

#[test]
fn plan_requests_only_raise_levels() {
    let mut plan = InvalidationPlan::none().with(ViewId::Lexis, InvalidationLevel::Render);
    plan.request(ViewId::Lexis, InvalidationLevel::Full);
    assert_eq!(plan.level(ViewId::Lexis), InvalidationLevel::Full);

    plan.request(ViewId::Lexis, InvalidationLevel::Render);
    plan.request(ViewId::BarChart, InvalidationLevel::None);
    assert_eq!(plan.level(ViewId::Lexis), InvalidationLevel::Full);
    assert_eq!(plan.views().collect::<Vec<_>>(), vec![(ViewId::Lexis, InvalidationLevel::Full)]);
}

#[test]
fn bar_click_filters_gender_across_views() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    let female = MarkKey::Category("female".to_owned());
    let (x, y) = mark_at(&dashboard, ViewId::BarChart, &female);

    let plan = dashboard.click(ViewId::BarChart, x, y);
    assert_eq!(plan.level(ViewId::Scatterplot), InvalidationLevel::Full);
    assert_eq!(
        dashboard.filter().gender(),
        &GenderFilter::Only("female".to_owned())
    );

    assert_eq!(state_of(&dashboard, ViewId::BarChart, &female), Some(MarkState::Selected));
    assert_eq!(
        state_of(&dashboard, ViewId::BarChart, &MarkKey::Category("male".to_owned())),
        Some(MarkState::Inactive)
    );
    for view in [ViewId::Scatterplot, ViewId::Lexis] {
        assert_eq!(state_of(&dashboard, view, &MarkKey::Id(1)), Some(MarkState::Inactive));
        assert_eq!(state_of(&dashboard, view, &MarkKey::Id(2)), Some(MarkState::Active));
    }

    dashboard.click(ViewId::BarChart, x, y);
    assert_eq!(dashboard.filter().gender(), &GenderFilter::Any);
    assert_eq!(
        state_of(&dashboard, ViewId::Scatterplot, &MarkKey::Id(1)),
        Some(MarkState::Active)
    );
}

#[test]
fn selection_wins_over_gender_filter() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    dashboard.apply(FilterIntent::ToggleGender("female".to_owned()));
    dashboard.apply(FilterIntent::ToggleSelection(1));

    assert_eq!(
        state_of(&dashboard, ViewId::Scatterplot, &MarkKey::Id(1)),
        Some(MarkState::Selected)
    );
    let arrow = dashboard
        .frame(ViewId::Lexis)
        .and_then(|frame| frame.mark(&MarkKey::Id(1)))
        .expect("lexis arrow");
    assert_eq!(arrow.state, MarkState::Selected);
    assert_eq!(arrow.style.stroke, Some(Color::rgb8(0xff, 0xa5, 0x00)));
    assert_eq!(arrow.style.stroke_width, 4.0);
}

#[test]
fn clicking_points_and_arrows_toggles_selection() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    let (x, y) = mark_at(&dashboard, ViewId::Scatterplot, &MarkKey::Id(2));

    let plan = dashboard.click(ViewId::Scatterplot, x, y);
    assert_eq!(plan.level(ViewId::Lexis), InvalidationLevel::Render);
    assert_eq!(dashboard.filter().selected_ids(), [2]);
    assert_eq!(state_of(&dashboard, ViewId::Lexis, &MarkKey::Id(2)), Some(MarkState::Selected));

    let (ax, ay) = mark_at(&dashboard, ViewId::Lexis, &MarkKey::Id(2));
    dashboard.click(ViewId::Lexis, ax, ay);
    assert!(dashboard.filter().selected_ids().is_empty());

    assert!(dashboard.click(ViewId::Scatterplot, 1.0, 1.0).is_none());
}

#[test]
fn inactive_points_ignore_clicks_and_hover() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    dashboard.apply(FilterIntent::ToggleGender("female".to_owned()));
    let (x, y) = mark_at(&dashboard, ViewId::Scatterplot, &MarkKey::Id(1));

    assert!(dashboard.hover(ViewId::Scatterplot, x, y).is_none());
    assert!(dashboard.click(ViewId::Scatterplot, x, y).is_none());
    assert!(dashboard.filter().selected_ids().is_empty());
}

#[test]
fn hover_shows_leader_tooltip_and_highlight() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    let (x, y) = mark_at(&dashboard, ViewId::Scatterplot, &MarkKey::Id(2));

    let tooltip = dashboard
        .hover(ViewId::Scatterplot, x, y)
        .expect("tooltip over an active point");
    assert_eq!(tooltip.title, "B");
    assert_eq!(tooltip.subtitle.as_deref(), Some("X, 2000 - 2004"));
    assert_eq!(
        tooltip.lines,
        vec![
            "Age at inauguration: 45".to_owned(),
            "Time in office: 4 years".to_owned(),
            "GDP/Capita: 40000".to_owned(),
        ]
    );

    let hovered = dashboard
        .frame(ViewId::Scatterplot)
        .and_then(|frame| frame.mark(&MarkKey::Id(2)))
        .expect("hovered point");
    assert_eq!(hovered.style.fill, Some(Color::rgb8(0x22, 0x22, 0x22)));
    assert_eq!(hovered.style.stroke, Some(Color::BLACK));

    assert!(dashboard.leave(ViewId::Scatterplot));
    let restored = dashboard
        .frame(ViewId::Scatterplot)
        .and_then(|frame| frame.mark(&MarkKey::Id(2)))
        .expect("point");
    assert_eq!(restored.style.fill, Some(Color::rgb8(0x33, 0x33, 0x55)));
    assert_eq!(restored.style.stroke, None);
}

#[test]
fn lexis_hover_thickens_the_arrow() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    let (x, y) = mark_at(&dashboard, ViewId::Lexis, &MarkKey::Id(1));

    let tooltip = dashboard.hover(ViewId::Lexis, x, y).expect("tooltip");
    assert_eq!(tooltip.title, "A");
    assert_eq!(tooltip.lines[1], "Time in office: 5 years");

    let arrow = dashboard
        .frame(ViewId::Lexis)
        .and_then(|frame| frame.mark(&MarkKey::Id(1)))
        .expect("arrow");
    assert_eq!(arrow.style.stroke, Some(Color::rgb8(0x99, 0x99, 0x99)));
    assert_eq!(arrow.style.stroke_width, 3.0);
}

#[test]
fn lexis_year_ticks_use_grouped_digits() {
    let dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    let labels: Vec<&str> = dashboard
        .frame(ViewId::Lexis)
        .expect("lexis frame")
        .texts
        .iter()
        .map(|text| text.text.as_str())
        .collect();
    assert!(labels.contains(&"1,950"));
    assert!(labels.contains(&"2,020"));
    assert!(!labels.contains(&"1950"));
    assert!(labels.contains(&"30"));
}

#[test]
fn group_switch_rebinds_views_and_resets_gender() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    dashboard.apply(FilterIntent::ToggleGender("male".to_owned()));
    dashboard.apply(FilterIntent::ToggleSelection(2));

    let plan = dashboard.select_group("eu27");
    for view in [ViewId::BarChart, ViewId::Scatterplot, ViewId::Lexis] {
        assert_eq!(plan.level(view), InvalidationLevel::Full);
    }
    assert_eq!(dashboard.group(), "eu27");
    assert_eq!(dashboard.filter().gender(), &GenderFilter::Any);
    assert_eq!(dashboard.filter().selected_ids(), [2]);

    assert_eq!(dashboard.lexis().data().len(), 1);
    assert!(dashboard.scatterplot().data().is_empty());
    assert_eq!(dashboard.bar_chart().counts().len(), 1);
    assert_eq!(
        state_of(&dashboard, ViewId::Lexis, &MarkKey::Id(4)),
        Some(MarkState::Active)
    );

    dashboard.select_group("brics");
    assert!(dashboard.lexis().data().is_empty());
    assert!(dashboard.frame(ViewId::BarChart).is_some_and(|frame| frame.marks.is_empty()));
}

#[test]
fn observers_see_events_in_order() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    dashboard
        .register_observer(Box::new(Recorder {
            events: Rc::clone(&events),
        }))
        .expect("register observer");
    let duplicate = dashboard.register_observer(Box::new(Recorder {
        events: Rc::clone(&events),
    }));
    assert!(duplicate.is_err());

    dashboard.apply(FilterIntent::ToggleGender("female".to_owned()));
    dashboard.apply(FilterIntent::ClearSelection);

    let events = events.borrow();
    assert_eq!(events[0], DashboardEvent::DataLoaded { records: 4 });
    assert_eq!(
        events[1],
        DashboardEvent::IntentApplied {
            intent: FilterIntent::ToggleGender("female".to_owned()),
            changed: true,
        }
    );
    let rendered: Vec<ViewId> = events[2..5]
        .iter()
        .filter_map(|event| match event {
            DashboardEvent::Rendered { view, .. } => Some(*view),
            _ => None,
        })
        .collect();
    assert_eq!(
        rendered,
        vec![ViewId::Scatterplot, ViewId::Lexis, ViewId::BarChart]
    );
    assert_eq!(
        events[5],
        DashboardEvent::IntentApplied {
            intent: FilterIntent::ClearSelection,
            changed: false,
        }
    );
    assert_eq!(events.len(), 6);
    drop(events);
    assert!(dashboard.unregister_observer("recorder"));
}

#[test]
fn snapshot_round_trips_through_json_contract() {
    let mut dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    dashboard.apply(FilterIntent::ToggleSelection(1));
    let snapshot = dashboard.snapshot();

    let json = snapshot.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains("\"schema_version\": 1"));
    let restored = DashboardSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored.group.as_deref(), Some("oecd"));
    assert_eq!(restored.filter, *dashboard.filter());
    assert_eq!(restored.views.len(), 3);
    let keys = |snapshot: &DashboardSnapshot| {
        snapshot
            .view(ViewId::Lexis)
            .map(|view| view.frame.marks.iter().map(|m| m.key.clone()).collect::<Vec<_>>())
    };
    assert_eq!(keys(&restored), keys(&snapshot));

    let bare = snapshot.to_json_pretty().expect("serialize bare");
    assert!(DashboardSnapshot::from_json_compat_str(&bare).is_ok());
    assert!(DashboardSnapshot::from_json_compat_str("{\"schema_version\": 2}").is_err());
}

#[test]
fn views_render_through_backends() {
    let dashboard = LeaderDashboard::new(leaders()).expect("dashboard");
    let mut null = NullRenderer::default();
    dashboard
        .render_with(ViewId::Scatterplot, &mut null)
        .expect("scatterplot frame is valid");
    assert_eq!(null.last_mark_count, 2);

    let mut svg = SvgRenderer::default();
    dashboard
        .render_with(ViewId::Lexis, &mut svg)
        .expect("lexis frame is valid");
    assert!(svg.document().contains("marker-end=\"url(#arrow-dddddd)\""));

    assert!(dashboard.render_with(ViewId::Trials, &mut null).is_err());
}
