//! Paging-mode grid behavior against a scripted transport.

mod common;

use std::sync::Arc;

use common::HostEvent;
use common::MockTransport;
use common::RecordingHost;
use common::payload;
use common::row;
use common::rows;
use evolugrid_lib::Grid;
use evolugrid_lib::LoadStatus;
use evolugrid_lib::Outcome;
use evolugrid_lib::ResponsePayload;
use evolugrid_lib::descriptor::ColumnSpec;
use evolugrid_lib::descriptor::GridOptions;
use evolugrid_lib::error::ConfigError;
use evolugrid_lib::error::TransportError;
use evolugrid_lib::filter::FilterEntry;
use evolugrid_lib::query::SortOrder;
use evolugrid_lib::render::body_row_count;
use evolugrid_lib::view::Action;
use serde_json::json;

fn options() -> GridOptions {
    GridOptions::new("/items")
        .limit(2)
        .columns(vec![ColumnSpec::field("Id", "id").sortable()])
}

fn grid(options: GridOptions) -> (Grid, Arc<RecordingHost>, Arc<MockTransport>) {
    let host = Arc::new(RecordingHost::new());
    let transport = Arc::new(MockTransport::new());
    let grid = Grid::new(options, host.clone(), transport.clone()).unwrap();
    (grid, host, transport)
}

#[tokio::test]
async fn test_first_page_scenario() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(5), rows(1, 2)));

    assert_eq!(grid.refresh(0, None).await.unwrap(), Outcome::Rendered);

    let request = transport.last_request();
    assert_eq!(request.endpoint_url, "/items");
    assert_eq!(request.names(), vec!["offset", "limit", "sort_key", "sort_order"]);
    assert_eq!(request.param("offset").as_deref(), Some("0"));
    assert_eq!(request.param("limit").as_deref(), Some("2"));
    assert_eq!(request.param("sort_key").as_deref(), Some(""));

    let container = grid.container().await;
    assert_eq!(body_row_count(&container), 2);
    let pager = container.find_by_class("pager").unwrap();
    assert_eq!(pager.find_by_class("pager-label").unwrap().text_content(), "Page 1 / 3");
    assert!(pager.find_by_class("pager-next").is_some());
    assert!(pager.find_by_class("pager-previous").is_none());
}

#[tokio::test]
async fn test_page_offset_and_previous_trigger() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(5), rows(5, 1)));

    grid.refresh(2, None).await.unwrap();

    assert_eq!(transport.last_request().param("offset").as_deref(), Some("4"));
    let container = grid.container().await;
    assert!(container.find_by_class("pager-previous").is_some());
    assert!(container.find_by_class("pager-next").is_none());
    assert_eq!(grid.navigation().await.current_page, 2);
}

#[tokio::test]
async fn test_huge_page_saturates_offset() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(None, vec![]));

    grid.refresh(u64::MAX, None).await.unwrap();

    let offset = transport.last_request().param("offset");
    assert_eq!(offset, Some(u64::MAX.to_string()));
}

#[tokio::test]
async fn test_unknown_count_uses_full_page_hint() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(None, rows(1, 2)));
    grid.refresh(0, None).await.unwrap();
    let container = grid.container().await;
    assert_eq!(container.find_by_class("pager-label").unwrap().text_content(), "Page 1");
    assert!(container.find_by_class("pager-next").is_some());

    transport.reply(payload(None, rows(3, 1)));
    grid.refresh(1, None).await.unwrap();
    assert!(grid.container().await.find_by_class("pager-next").is_none());
}

#[tokio::test]
async fn test_zero_renders_and_missing_field_is_empty() {
    let options = GridOptions::new("/items").columns(vec![
        ColumnSpec::field("Stock", "stock"),
        ColumnSpec::field("Note", "note"),
    ]);
    let (grid, _host, transport) = grid(options);
    transport.reply(payload(Some(1), vec![row(json!({ "stock": 0 }))]));

    grid.refresh(0, None).await.unwrap();

    let html = grid.html().await;
    assert!(html.contains("<td>0</td><td></td>"), "{html}");
}

#[tokio::test]
async fn test_filter_precedence() {
    let options = options()
        .filter_form_selector("#filters")
        .filter_callback(|| vec![FilterEntry::new("from", "callback")]);
    let (grid, host, transport) = grid(options);
    host.set_form(vec![FilterEntry::new("from", "form")]);

    transport.reply(payload(Some(0), vec![]));
    grid.refresh(0, Some(vec![FilterEntry::new("from", "explicit")])).await.unwrap();
    assert_eq!(transport.last_request().param("from").as_deref(), Some("explicit"));

    transport.reply(payload(Some(0), vec![]));
    grid.refresh(0, None).await.unwrap();
    assert_eq!(transport.last_request().param("from").as_deref(), Some("callback"));

    assert_eq!(host.form_reads(), 0);
}

#[tokio::test]
async fn test_form_filters_and_controls() {
    let options = options()
        .filter_form_selector("#filters")
        .loader_element_selector("#loader");
    let (grid, host, transport) = grid(options);
    host.set_form(vec![FilterEntry::new("q", "lamp")]);
    transport.reply(payload(Some(3), rows(1, 2)));

    grid.refresh(0, None).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.names(), vec!["q", "offset", "limit", "sort_key", "sort_order"]);
    assert_eq!(host.form_reads(), 1);
    assert_eq!(
        host.events(),
        vec![
            HostEvent::Controls { selector: "#filters".into(), enabled: false },
            HostEvent::Loader { visible: true },
            HostEvent::Count(Some(3)),
            HostEvent::Controls { selector: "#filters".into(), enabled: true },
            HostEvent::Loader { visible: false },
        ]
    );
    assert!(!grid.container().await.hidden);
}

#[tokio::test]
async fn test_reserved_parameters_win_over_filters() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(0), vec![]));

    grid.refresh(0, Some(vec![FilterEntry::new("limit", 999)])).await.unwrap();

    let request = transport.last_request();
    let limits: Vec<_> = request.params.iter().filter(|e| e.name == "limit").collect();
    assert_eq!(limits.len(), 2);
    assert_eq!(limits[1].value.to_string(), "2");
}

#[tokio::test]
async fn test_sort_action_reloads_first_page() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(5), rows(1, 2)));
    grid.refresh(1, None).await.unwrap();

    transport.reply(payload(Some(5), rows(1, 2)));
    let action = Action::Sort { key: "id".into(), order: SortOrder::Desc };
    grid.activate(&action).await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.param("offset").as_deref(), Some("0"));
    assert_eq!(request.param("sort_key").as_deref(), Some("id"));
    assert_eq!(request.param("sort_order").as_deref(), Some("desc"));
    assert_eq!(grid.navigation().await.current_page, 0);
}

#[tokio::test]
async fn test_rendered_triggers_drive_navigation() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(5), rows(1, 2)));
    grid.refresh(0, None).await.unwrap();

    let next = grid
        .container()
        .await
        .find_by_class("pager-next")
        .and_then(|e| e.action.clone())
        .unwrap();
    assert_eq!(next, Action::Page(1));

    transport.reply(payload(Some(5), rows(3, 2)));
    grid.activate(&next).await.unwrap();
    assert_eq!(transport.last_request().param("offset").as_deref(), Some("2"));
}

#[tokio::test]
async fn test_submit_filters_resets_navigation() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(5), rows(1, 2)));
    grid.sort("id", SortOrder::Asc).await.unwrap();
    transport.reply(payload(Some(5), rows(3, 2)));
    grid.refresh(1, None).await.unwrap();

    transport.reply(payload(Some(5), rows(1, 2)));
    grid.submit_filters().await.unwrap();

    let request = transport.last_request();
    assert_eq!(request.param("offset").as_deref(), Some("0"));
    assert_eq!(request.param("sort_key").as_deref(), Some(""));
    let navigation = grid.navigation().await;
    assert_eq!(navigation.current_page, 0);
    assert_eq!(navigation.sort.key, None);
}

#[tokio::test]
async fn test_stale_response_is_discarded() {
    let (grid, _host, transport) = grid(options());
    let first = transport.gate();
    let second = transport.gate();

    let slow = tokio::spawn({
        let grid = grid.clone();
        async move { grid.refresh(0, None).await }
    });
    while transport.requests().is_empty() {
        tokio::task::yield_now().await;
    }
    let fast = tokio::spawn({
        let grid = grid.clone();
        async move { grid.refresh(1, None).await }
    });
    while transport.requests().len() < 2 {
        tokio::task::yield_now().await;
    }

    second.send(payload(Some(5), rows(3, 2))).unwrap();
    assert_eq!(fast.await.unwrap().unwrap(), Outcome::Rendered);

    first.send(payload(Some(5), rows(1, 2))).unwrap();
    assert_eq!(slow.await.unwrap().unwrap(), Outcome::Superseded);

    assert_eq!(grid.navigation().await.current_page, 1);
    let html = grid.html().await;
    assert!(html.contains("<td>3</td>"), "{html}");
    assert!(!html.contains("<td>1</td>"), "{html}");
}

#[tokio::test]
async fn test_failure_restores_interactive_state() {
    let options = options()
        .filter_submit_selector("#go")
        .loader_element_selector("#loader");
    let (grid, host, transport) = grid(options);
    transport.reply(payload(Some(5), rows(1, 2)));
    grid.refresh(0, None).await.unwrap();

    transport.reply(Err(TransportError::http(503, "unavailable")));
    let err = grid.refresh(1, None).await.unwrap_err();
    assert!(err.is_transport());

    let events = host.events();
    assert_eq!(
        &events[events.len() - 2..],
        &[
            HostEvent::Controls { selector: "#go".into(), enabled: true },
            HostEvent::Loader { visible: false },
        ]
    );
    let navigation = grid.navigation().await;
    assert_eq!(navigation.status, LoadStatus::Failed);
    assert_eq!(navigation.current_page, 0);
    let container = grid.container().await;
    assert!(!container.hidden);
    assert_eq!(body_row_count(&container), 2);
}

#[tokio::test]
async fn test_server_descriptor_override() {
    let (grid, _host, transport) = grid(options());
    let reply = ResponsePayload::new(Some(2), rows(1, 2)).with_descriptor(json!({
        "endpointUrl": "/elsewhere",
        "tableClasses": "striped",
        "columns": [{ "title": "Name", "fieldKey": "id" }],
    }));
    transport.reply(Ok(reply));

    grid.refresh(0, None).await.unwrap();

    let descriptor = grid.descriptor().await;
    assert_eq!(descriptor.endpoint_url, "/items");
    assert_eq!(descriptor.table_classes.as_deref(), Some("striped"));
    assert!(grid.html().await.contains("<th>Name</th>"));

    transport.reply(payload(Some(2), vec![]));
    grid.refresh(0, None).await.unwrap();
    assert_eq!(transport.last_request().endpoint_url, "/items");
}

#[tokio::test]
async fn test_invalid_override_keeps_previous_render() {
    let (grid, _host, transport) = grid(options());
    transport.reply(payload(Some(5), rows(1, 2)));
    grid.refresh(0, None).await.unwrap();

    let reply = ResponsePayload::new(Some(5), rows(3, 2)).with_descriptor(json!({ "limit": 0 }));
    transport.reply(Ok(reply));
    let err = grid.refresh(1, None).await.unwrap_err();

    assert!(err.is_config());
    assert!(grid.html().await.contains("<td>1</td>"));
    assert_eq!(grid.navigation().await.status, LoadStatus::Failed);
}

#[tokio::test]
async fn test_export_csv_opens_url() {
    let options = options().export_csv(true).filter_form_selector("#filters");
    let (grid, host, _transport) = grid(options);
    host.set_form(vec![FilterEntry::new("q", "a b")]);

    let url = grid.export_csv(None).await;

    assert_eq!(url, "/items?q=a%20b&output=csv");
    assert_eq!(host.events(), vec![HostEvent::Opened(url)]);
}

#[tokio::test]
async fn test_initialize_loads_first_page() {
    let host = Arc::new(RecordingHost::new());
    let transport = Arc::new(MockTransport::new());
    transport.reply(payload(Some(1), rows(1, 1)));

    let grid = Grid::initialize(options(), host.clone(), transport.clone()).await.unwrap();

    assert_eq!(transport.requests().len(), 1);
    assert_eq!(body_row_count(&grid.container().await), 1);
    assert!(host.last_container().is_some());
}

#[tokio::test]
async fn test_initialize_survives_failed_load() {
    let transport = Arc::new(MockTransport::new());
    transport.reply(Err(TransportError::http(500, "boom")));

    let grid = Grid::initialize(options(), Arc::new(RecordingHost::new()), transport).await.unwrap();

    assert_eq!(grid.navigation().await.status, LoadStatus::Failed);
}

#[tokio::test]
async fn test_initialize_without_load() {
    let transport = Arc::new(MockTransport::new());
    let options = options().load_on_init(false);

    Grid::initialize(options, Arc::new(RecordingHost::new()), transport.clone()).await.unwrap();

    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_initialize_rejects_bad_configuration() {
    let transport = Arc::new(MockTransport::new());
    let options = GridOptions::new("/items");

    let err = Grid::initialize(options, Arc::new(RecordingHost::new()), transport.clone())
        .await
        .unwrap_err();

    assert_eq!(err, ConfigError::MissingField("columns"));
    assert!(transport.requests().is_empty());
}
