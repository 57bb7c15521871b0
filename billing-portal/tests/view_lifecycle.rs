//! Mount-to-render behavior of a billing view against an HTTP data source.

mod common;

use billing_portal::render::{InvoiceCell, Layout, Renderer, ERROR_NOTICE, LOADING_TEXT};
use billing_portal::view::{BillingView, ViewState};
use common::{billing_document, http_loader, DOCUMENT_PATH};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn document_mock(response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path(DOCUMENT_PATH))
        .respond_with(response)
}

fn notice() -> Layout {
    Layout::Notice {
        text: ERROR_NOTICE.to_string(),
    }
}

#[tokio::test]
async fn loaded_view_renders_banner_and_invoice_link() {
    let server = MockServer::start().await;
    document_mock(ResponseTemplate::new(200).set_body_json(billing_document(json!("INV-1001"))))
        .expect(1)
        .mount(&server)
        .await;

    let view = BillingView::mount(http_loader(&server.uri(), None));
    let state = view.settled().await;
    assert!(matches!(state, ViewState::Loaded(_)));

    let layout = view.render(&Renderer::default());
    let page = layout.page().expect("loaded view renders a page");
    assert_eq!(page.main.banner.amount, "₹ 499");
    assert_eq!(page.main.banner.due_date, "2024-05-01");
    assert_eq!(page.main.table.rows.len(), 1);
    assert_eq!(
        page.main.table.rows[0].invoice,
        InvoiceCell::Link {
            text: "INV-1001".to_string(),
            href: "https://invoice.url/INV-1001".to_string(),
        }
    );
}

#[tokio::test]
async fn null_invoice_renders_dash_without_link() {
    let server = MockServer::start().await;
    document_mock(ResponseTemplate::new(200).set_body_json(billing_document(json!(null))))
        .expect(1)
        .mount(&server)
        .await;

    let view = BillingView::mount(http_loader(&server.uri(), None));
    view.settled().await;

    let layout = view.render(&Renderer::default());
    let row = &layout.page().expect("page").main.table.rows[0];
    assert_eq!(row.invoice.text(), "-");
    assert_eq!(row.invoice.href(), None);
}

#[tokio::test]
async fn non_ok_statuses_render_the_notice() {
    for status in [404, 500] {
        let server = MockServer::start().await;
        document_mock(ResponseTemplate::new(status))
            .expect(1)
            .mount(&server)
            .await;

        let view = BillingView::mount(http_loader(&server.uri(), None));
        let state = view.settled().await;

        match &state {
            ViewState::Error(detail) => assert!(detail.contains(&status.to_string())),
            other => panic!("status {status} produced {other:?}"),
        }
        assert_eq!(view.render(&Renderer::default()), notice());
    }
}

#[tokio::test]
async fn invalid_json_body_is_an_error_not_a_crash() {
    let server = MockServer::start().await;
    document_mock(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let view = BillingView::mount(http_loader(&server.uri(), None));
    assert!(matches!(view.settled().await, ViewState::Error(_)));
    assert_eq!(view.render(&Renderer::default()), notice());
}

#[tokio::test]
async fn structurally_incomplete_document_is_an_error() {
    let mut document = billing_document(json!("INV-1001"));
    document["billingDetails"]
        .as_object_mut()
        .unwrap()
        .remove("address");

    let server = MockServer::start().await;
    document_mock(ResponseTemplate::new(200).set_body_json(document))
        .expect(1)
        .mount(&server)
        .await;

    let view = BillingView::mount(http_loader(&server.uri(), None));
    assert!(matches!(view.settled().await, ViewState::Error(_)));
    assert_eq!(view.render(&Renderer::default()), notice());
}

#[tokio::test]
async fn unreachable_source_is_an_error() {
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };

    let view = BillingView::mount(http_loader(&uri, None));
    assert!(matches!(view.settled().await, ViewState::Error(_)));
}

#[tokio::test]
async fn pending_fetch_keeps_loading_placeholder() {
    let server = MockServer::start().await;
    document_mock(
        ResponseTemplate::new(200)
            .set_body_json(billing_document(json!("INV-1001")))
            .set_delay(Duration::from_secs(30)),
    )
    .expect(1)
    .mount(&server)
    .await;

    let view = BillingView::mount(http_loader(&server.uri(), None));
    let state = view.settled_within(Duration::from_millis(200)).await;

    assert_eq!(state, ViewState::Loading);
    assert_eq!(
        view.render(&Renderer::default()),
        Layout::Placeholder {
            text: LOADING_TEXT.to_string()
        }
    );
}

#[tokio::test]
async fn configured_timeout_settles_a_hung_fetch_as_error() {
    let server = MockServer::start().await;
    document_mock(
        ResponseTemplate::new(200)
            .set_body_json(billing_document(json!("INV-1001")))
            .set_delay(Duration::from_secs(30)),
    )
    .mount(&server)
    .await;

    let view = BillingView::mount(http_loader(
        &server.uri(),
        Some(Duration::from_millis(100)),
    ));
    let state = view.settled_within(Duration::from_secs(5)).await;
    assert!(matches!(state, ViewState::Error(_)));
}

#[tokio::test]
async fn torn_down_view_never_transitions() {
    let server = MockServer::start().await;
    document_mock(
        ResponseTemplate::new(200)
            .set_body_json(billing_document(json!("INV-1001")))
            .set_delay(Duration::from_millis(300)),
    )
    .mount(&server)
    .await;

    let view = BillingView::mount(http_loader(&server.uri(), None));
    let mut subscriber = view.subscribe();
    view.unmount();

    // The fetch task exits without publishing, so the channel closes.
    let changed = tokio::time::timeout(Duration::from_secs(2), subscriber.changed())
        .await
        .expect("fetch task should stop after teardown");
    assert!(changed.is_err());
    assert_eq!(*subscriber.borrow(), ViewState::Loading);
}

#[tokio::test]
async fn each_mount_fetches_exactly_once() {
    let server = MockServer::start().await;
    document_mock(ResponseTemplate::new(200).set_body_json(billing_document(json!("INV-1001"))))
        .expect(2)
        .mount(&server)
        .await;

    let loader = http_loader(&server.uri(), None);

    let first = BillingView::mount(loader.clone());
    first.settled().await;
    // Reading and re-rendering a settled view does not refetch.
    first.render(&Renderer::default());
    first.settled().await;
    first.unmount();

    let second = BillingView::mount(loader);
    assert!(matches!(second.settled().await, ViewState::Loaded(_)));
}
