// Host-side tests for page-swap navigation: hide, fetch, swap and activate,
// including failed fetches and requests that overtake each other.

mod support;

use support::app::{navigate, App, NavigationOutcome, NavigationPhase, NavigationRequest};
use support::error::NavigationError;
use support::page::PagePhase;
use support::template::Template;
use support::{drive, run_frames, test_app, CountingRenderer, MockDocument, MockSource};

#[test]
fn boot_shows_the_initial_page() {
    let app = test_app("home", MockSource::default());
    let done = app.borrow_mut().boot();
    run_frames(&app, 40);

    let app = app.borrow();
    assert!(done.is_done());
    assert_eq!(app.template(), Template::Home);
    assert!(matches!(app.page().phase(), PagePhase::Shown));
    assert_eq!(app.canvas().activations(), 1);
    assert_eq!(app.canvas().graph().mesh_count(), 4);
    // chrome anchors plus the home link; the external one is skipped
    assert_eq!(app.document().dom().binds, vec![3]);
}

#[test]
fn unknown_initial_template_is_an_error() {
    let result = App::new(
        MockDocument::new("gallery"),
        MockSource::default(),
        CountingRenderer::default(),
        1,
    );
    assert!(matches!(
        result,
        Err(NavigationError::UnknownTemplate(t)) if t == "gallery"
    ));
}

#[test]
fn link_navigation_swaps_page_and_scene() {
    let source = MockSource::default().page("/about", "about");
    let app = test_app("home", source.clone());
    app.borrow_mut().boot();
    run_frames(&app, 40);

    let mut nav = Box::pin(navigate(&app, NavigationRequest::link("/about")));
    let outcome = drive(&app, &mut nav, 120).expect("navigation finishes");
    assert_eq!(outcome, NavigationOutcome::Completed(Template::About));

    let app_ref = app.borrow();
    let dom = app_ref.document().dom();
    assert_eq!(dom.history, vec!["/about".to_string()]);
    assert_eq!(dom.swaps, vec!["about".to_string()]);
    assert_eq!(source.requests(), vec!["/about".to_string()]);
    assert_eq!(app_ref.template(), Template::About);
    assert_eq!(app_ref.phase(), NavigationPhase::Idle);
    assert_eq!(app_ref.canvas().activations(), 2);
    assert_eq!(app_ref.canvas().graph().mesh_count(), 6);
    assert_eq!(app_ref.page_for(Template::About).shows(), 1);
    assert!(matches!(
        app_ref.page_for(Template::Home).phase(),
        PagePhase::Hiding(_) | PagePhase::Hidden
    ));
    assert_eq!(dom.binds.len(), 2);
}

#[test]
fn the_new_page_starts_listening_after_its_fade() {
    let source = MockSource::default().page("/collections", "collections");
    let app = test_app("home", source);
    app.borrow_mut().boot();
    run_frames(&app, 40);

    let mut nav = Box::pin(navigate(&app, NavigationRequest::link("/collections")));
    drive(&app, &mut nav, 120).expect("navigation finishes");
    assert!(!app.borrow().page().is_listening());
    run_frames(&app, 40);
    assert!(app.borrow().page().is_listening());
    // no gallery on collections
    assert_eq!(app.borrow().canvas().active_template(), None);
}

#[test]
fn history_navigation_does_not_push() {
    let source = MockSource::default().page("/about", "about");
    let app = test_app("home", source);
    app.borrow_mut().boot();

    let mut nav = Box::pin(navigate(&app, NavigationRequest::history("/about")));
    let outcome = drive(&app, &mut nav, 120).expect("navigation finishes");
    assert_eq!(outcome, NavigationOutcome::Completed(Template::About));
    assert!(app.borrow().document().dom().history.is_empty());
}

#[test]
fn failed_fetch_keeps_old_template_hidden() {
    let source = MockSource::default().route("/missing", 404, "not found");
    let app = test_app("home", source);
    app.borrow_mut().boot();
    run_frames(&app, 40);

    let mut nav = Box::pin(navigate(&app, NavigationRequest::link("/missing")));
    let outcome = drive(&app, &mut nav, 120).expect("navigation finishes");
    assert_eq!(
        outcome,
        NavigationOutcome::Failed(NavigationError::Status {
            url: "/missing".to_string(),
            status: 404,
        })
    );
    run_frames(&app, 2);

    let app = app.borrow();
    assert_eq!(app.template(), Template::Home);
    assert_eq!(app.phase(), NavigationPhase::Idle);
    assert!(app.document().dom().history.is_empty());
    assert!(app.document().dom().swaps.is_empty());
    assert!(matches!(app.page().phase(), PagePhase::Hidden));
    assert!(!app.page().is_listening());
    assert_eq!(app.canvas().activations(), 1);
}

#[test]
fn response_without_content_fails() {
    let source = MockSource::default().route("/bare", 200, "<html><body>hi</body></html>");
    let app = test_app("home", source);

    let mut nav = Box::pin(navigate(&app, NavigationRequest::link("/bare")));
    let outcome = drive(&app, &mut nav, 120).expect("navigation finishes");
    assert_eq!(
        outcome,
        NavigationOutcome::Failed(NavigationError::MissingContent {
            url: "/bare".to_string()
        })
    );
    assert_eq!(app.borrow().template(), Template::Home);
}

#[test]
fn unknown_template_in_response_fails_before_touching_history() {
    let source = MockSource::default().route(
        "/odd",
        200,
        r#"<div class="content" data-template="gallery">x</div>"#,
    );
    let app = test_app("home", source);

    let mut nav = Box::pin(navigate(&app, NavigationRequest::link("/odd")));
    let outcome = drive(&app, &mut nav, 120).expect("navigation finishes");
    assert_eq!(
        outcome,
        NavigationOutcome::Failed(NavigationError::UnknownTemplate("gallery".to_string()))
    );
    let app = app.borrow();
    assert!(app.document().dom().history.is_empty());
    assert!(app.document().dom().swaps.is_empty());
}

#[test]
fn newer_request_during_hide_supersedes_older() {
    let source = MockSource::default()
        .page("/about", "about")
        .page("/collections", "collections");
    let app = test_app("home", source.clone());
    app.borrow_mut().boot();
    run_frames(&app, 40);

    let mut first = Box::pin(navigate(&app, NavigationRequest::link("/about")));
    assert!(drive(&app, &mut first, 6).is_none());

    let mut second = Box::pin(navigate(&app, NavigationRequest::link("/collections")));
    assert!(drive(&app, &mut second, 1).is_none());
    assert_eq!(app.borrow().generation(), 2);

    // the older hide was killed, so the first request wakes up stale
    let outcome = drive(&app, &mut first, 1).expect("first settles");
    assert_eq!(outcome, NavigationOutcome::Superseded);

    let outcome = drive(&app, &mut second, 120).expect("second finishes");
    assert_eq!(outcome, NavigationOutcome::Completed(Template::Collections));

    let app = app.borrow();
    assert_eq!(source.requests(), vec!["/collections".to_string()]);
    assert_eq!(app.document().dom().history, vec!["/collections".to_string()]);
    assert_eq!(app.template(), Template::Collections);
    assert_eq!(app.page_for(Template::About).shows(), 0);
}

#[test]
fn stale_fetch_result_is_discarded() {
    let source = MockSource::default()
        .page("/about", "about")
        .page("/collections", "collections");
    let gate = source.hold("/about");
    let app = test_app("home", source.clone());
    app.borrow_mut().boot();
    run_frames(&app, 40);

    let mut first = Box::pin(navigate(&app, NavigationRequest::link("/about")));
    assert!(drive(&app, &mut first, 60).is_none());
    assert_eq!(app.borrow().phase(), NavigationPhase::Fetching);

    let mut second = Box::pin(navigate(&app, NavigationRequest::link("/collections")));
    let outcome = drive(&app, &mut second, 120).expect("second finishes");
    assert_eq!(outcome, NavigationOutcome::Completed(Template::Collections));

    gate.open();
    let outcome = drive(&app, &mut first, 1).expect("first settles");
    assert_eq!(outcome, NavigationOutcome::Superseded);

    let app = app.borrow();
    assert_eq!(
        source.requests(),
        vec!["/about".to_string(), "/collections".to_string()]
    );
    assert_eq!(app.template(), Template::Collections);
    assert_eq!(app.document().dom().swaps, vec!["collections".to_string()]);
    assert_eq!(app.canvas().active_template(), None);
}

#[test]
fn wheel_reaches_page_and_home_strip() {
    let app = test_app("home", MockSource::default());
    app.borrow_mut().boot();
    run_frames(&app, 40);
    app.borrow_mut().on_wheel(support::input::WheelDelta {
        pixel_x: 0.0,
        pixel_y: 250.0,
    });
    let app = app.borrow();
    let Some(support::canvas::SceneModule::Home(gallery)) = app.canvas().module() else {
        panic!("expected the home scene");
    };
    assert_eq!(gallery.scroll_y().target, 250.0);
}

#[test]
fn alternating_navigations_keep_tween_history_bounded() {
    let source = MockSource::default()
        .page("/about", "about")
        .page("/", "home");
    let app = test_app("home", source);
    app.borrow_mut().boot();
    run_frames(&app, 40);

    let mut sizes = Vec::new();
    for round in 0..20 {
        let url = if round % 2 == 0 { "/about" } else { "/" };
        let mut nav = Box::pin(navigate(&app, NavigationRequest::link(url)));
        drive(&app, &mut nav, 120).expect("navigation finishes");
        run_frames(&app, 40);
        sizes.push(app.borrow().animator().remembered());
    }

    // swapped-out elements are released when their controller is re-created
    assert!(sizes[19] <= sizes[1], "history grew: {sizes:?}");
    assert_eq!(sizes[18], sizes[16], "history grew: {sizes:?}");
    assert_eq!(sizes[19], sizes[17], "history grew: {sizes:?}");
}
