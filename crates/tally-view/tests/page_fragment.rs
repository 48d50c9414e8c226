//! Drawing both statistics charts into one container and reading the result
//! back as markup and as terminal text.

use pretty_assertions::assert_eq;
use tally_view::{
    ChartJsBackend, ChartRequest, ChartSink, ChartStyle, Container, Content, Orientation,
    PanelBody, RenderOutcome, TextBackend,
};

fn tag_chart() -> ChartRequest {
    ChartRequest {
        canvas_id: "oCountByTagsChart".into(),
        labels: vec!["A".into(), "B".into()],
        values: vec![2, 2],
        series_label: "Tag Count".into(),
        title: "O-Count by Tag".into(),
        orientation: Orientation::Horizontal,
        style: ChartStyle::with_colors("rgba(54, 162, 235, 0.5)", "rgba(54, 162, 235, 1)"),
    }
}

fn year_chart() -> ChartRequest {
    ChartRequest {
        canvas_id: "ocountByDateChart".into(),
        labels: vec!["2020".into(), "Unknown".into()],
        values: vec![5, 5],
        series_label: "Total O-Count".into(),
        title: "O-Count by year of media".into(),
        orientation: Orientation::Vertical,
        style: ChartStyle::with_colors("rgba(75, 192, 192, 0.5)", "rgba(75, 192, 192, 1)"),
    }
}

fn mounted() -> Container {
    let mut container = Container::new("ocount-stats-section");
    container.show_canvases(&["oCountByTagsChart", "ocountByDateChart"]);
    container
}

#[test]
fn chartjs_fragment_carries_one_script_per_canvas() {
    let mut sink = ChartSink::new(ChartJsBackend::new());
    let mut container = mounted();

    for request in [tag_chart(), year_chart()] {
        assert_eq!(sink.render(&mut container, &request).unwrap(), RenderOutcome::Drawn);
    }

    let html = container.to_html();
    assert!(html.starts_with("<div id=\"ocount-stats-section\">"));
    assert_eq!(html.matches("<script>").count(), 2);
    assert!(html.contains("O-Count by year of media"));
    assert_eq!(sink.live_count(), 2);
}

#[test]
fn text_backend_renders_both_charts() {
    let mut sink = ChartSink::new(TextBackend::new(10));
    let mut container = mounted();
    sink.render(&mut container, &tag_chart()).unwrap();
    sink.render(&mut container, &year_chart()).unwrap();

    let text = container.to_text();
    assert!(text.starts_with("O-Count Statistics\n"));
    assert!(text.contains("O-Count by Tag\n"));
    assert!(text.contains("A │██████████ 2"));
    assert!(text.contains("Unknown"));
}

#[test]
fn both_panels_fall_back_without_backend() {
    let mut sink: ChartSink<TextBackend> = ChartSink::without_backend();
    let mut container = mounted();
    sink.render(&mut container, &tag_chart()).unwrap();
    sink.render(&mut container, &year_chart()).unwrap();

    let Content::Charts(panels) = &container.content else {
        panic!("expected chart panels");
    };
    assert!(
        panels
            .iter()
            .all(|p| matches!(&p.body, PanelBody::Notice(lines) if lines[0] == "Chart library not found."))
    );
    assert!(container.to_html().contains("<p style=\"color: yellow;\">Chart library not found.</p>"));
}
