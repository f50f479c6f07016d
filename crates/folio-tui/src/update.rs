//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! After every event the page is re-synchronized: a stale layout is rebuilt,
//! a pending on-mount scroll is resolved once its section exists, and the
//! highlighter sees every change of scroll offset.

use std::time::Instant;

use ratatui::layout::{Position, Rect};

use crate::effects::UiEffect;
use crate::events::{Intent, UiEvent};
use crate::features::header;
use crate::features::page::Target;
use crate::input;
use crate::render;
use crate::state::AppState;

/// Effects to run once before the first frame.
pub fn init(app: &mut AppState) -> Vec<UiEffect> {
    if app.settings.reveal_enabled && !app.portfolio.about.is_empty() {
        vec![UiEffect::StartReveal {
            text: app.portfolio.about.clone(),
        }]
    } else {
        app.about_revealed = true;
        vec![]
    }
}

/// Stops the reveal timers and releases highlight tracking before exit.
pub fn shutdown(app: &mut AppState) {
    app.reveal.cancel();
    app.highlighter.detach();
}

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let effects = match event {
        UiEvent::Tick => {
            handle_tick(app, Instant::now());
            vec![]
        }
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(event) => match input::intent_for(&event) {
            Some(intent) => handle_intent(app, intent),
            None => vec![],
        },
        UiEvent::Reveal(tick) => {
            app.reveal.apply(tick);
            vec![]
        }
        UiEvent::RevealCompleted(id) => {
            if app.reveal.active_id() == Some(id) && !app.about_revealed {
                tracing::debug!(id = id.0, "about text revealed");
                app.about_revealed = true;
                app.page.mark_dirty();
            }
            vec![]
        }
        UiEvent::Intent(intent) => handle_intent(app, intent),
    };
    sync_page(app);
    effects
}

fn handle_tick(app: &mut AppState, now: Instant) {
    app.page.scroll.step();
    if let Some(attempt) = app.navigator.poll(&mut app.page.surface(), now) {
        tracing::debug!(?attempt, "deferred scroll resolved");
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    app.screen = (width, height);
    let screen = render::screen_layout(Rect::new(0, 0, width, height));
    app.page.set_viewport(screen.page.width, screen.page.height);
}

fn sync_page(app: &mut AppState) {
    let rebuilt = app.page.rebuild_if_needed(&app.portfolio, app.expanded.as_deref());
    if rebuilt {
        resolve_mounted_scroll(app);
        let words = app.page.layout.tracked_words(app.about_revealed);
        app.highlighter.sync(words, &app.page.view());
    }
    if app.page.take_scroll_event() || rebuilt {
        app.highlighter.on_scroll(&app.page.view());
        // Content moved under a resting pointer.
        if !app.focus_from_keyboard {
            refresh_pointer_hover(app);
        }
    }
}

fn resolve_mounted_scroll(app: &mut AppState) {
    let Some(anchor) = app.navigator.pending_anchor().map(str::to_owned) else {
        return;
    };
    if app.page.layout.has_anchor(&anchor) {
        app.navigator.section_mounted(&mut app.page.surface(), &anchor);
    }
}

// ============================================================================
// Intents
// ============================================================================

fn handle_intent(app: &mut AppState, intent: Intent) -> Vec<UiEffect> {
    match intent {
        Intent::Quit => return vec![UiEffect::Quit],
        Intent::HoverButton(index) => {
            app.hovered = index
                .filter(|index| *index < app.portfolio.nav.len())
                .map(Target::Nav);
        }
        Intent::ActivateNav(index) => activate_nav(app, index),
        Intent::SelectProject(id) => select_project(app, &id),
        Intent::CollapseProject => collapse_project(app),
        Intent::OpenLink(index) => return open_link(app, index),
        Intent::OpenVideo => return open_video(app),
        Intent::SkipReveal => {
            app.reveal.force_complete();
        }
        Intent::ScrollBy(delta) => app.page.scroll.scroll_by(delta),
        Intent::ScrollPage(pages) => app.page.scroll.page(pages),
        Intent::ScrollToTop => app.page.scroll.scroll_to(0, app.settings.behavior),
        Intent::ScrollToBottom => {
            let bottom = app.page.scroll.max_offset();
            app.page.scroll.scroll_to(bottom, app.settings.behavior);
        }
        Intent::FocusNext => move_focus(app, true),
        Intent::FocusPrev => move_focus(app, false),
        Intent::ActivateFocus => {
            if let Some(target) = app.hovered {
                return activate(app, target);
            }
        }
        Intent::PointerMoved { column, row } => pointer_moved(app, column, row),
        Intent::Click { column, row } => {
            pointer_moved(app, column, row);
            if let Some(target) = app.hovered {
                return activate(app, target);
            }
        }
    }
    vec![]
}

fn activate(app: &mut AppState, target: Target) -> Vec<UiEffect> {
    match target {
        Target::Nav(index) => activate_nav(app, index),
        Target::Project(index) => {
            if let Some(id) = app.portfolio.projects.get(index).map(|p| p.id.clone()) {
                select_project(app, &id);
            }
        }
        Target::Video(_) => return open_video(app),
        Target::Link(index) => return open_link(app, index),
    }
    vec![]
}

fn activate_nav(app: &mut AppState, index: usize) {
    let Some(target) = app.portfolio.nav.get(index) else {
        return;
    };
    app.navigator
        .scroll_to_section(&mut app.page.surface(), &target.anchor_id);
}

fn select_project(app: &mut AppState, id: &str) {
    if app.portfolio.project(id).is_none() {
        tracing::debug!(id, "unknown project, ignoring");
        return;
    }
    let trigger = app.settings.trigger;
    let expanded = &mut app.expanded;
    app.navigator.expand_and_scroll(
        id,
        |id| *expanded = Some(id.to_string()),
        trigger,
        Instant::now(),
    );
    app.page.mark_dirty();
}

fn collapse_project(app: &mut AppState) {
    if app.expanded.take().is_some() {
        app.navigator.cancel_pending();
        if matches!(app.hovered, Some(Target::Video(_))) {
            app.hovered = None;
        }
        app.page.mark_dirty();
    }
}

fn open_link(app: &AppState, index: usize) -> Vec<UiEffect> {
    app.portfolio
        .contact
        .get(index)
        .map(|link| UiEffect::OpenUrl {
            url: link.href.to_string(),
        })
        .into_iter()
        .collect()
}

fn open_video(app: &AppState) -> Vec<UiEffect> {
    app.expanded
        .as_deref()
        .and_then(|id| app.portfolio.project(id))
        .and_then(|project| project.embed_url())
        .map(|url| UiEffect::OpenUrl {
            url: url.to_string(),
        })
        .into_iter()
        .collect()
}

fn move_focus(app: &mut AppState, forward: bool) {
    let order = app.focus_order();
    if order.is_empty() {
        return;
    }
    let current = app
        .hovered
        .and_then(|target| order.iter().position(|t| *t == target));
    let next = match (current, forward) {
        (None, true) => 0,
        (None, false) => order.len() - 1,
        (Some(idx), true) => (idx + 1) % order.len(),
        (Some(idx), false) => (idx + order.len() - 1) % order.len(),
    };
    let target = order[next];
    app.hovered = Some(target);
    app.focus_from_keyboard = true;
    if let Some(hit) = app.page.layout.hit_box(target) {
        let lines = hit.lines.clone();
        app.page.scroll.ensure_visible(lines);
    }
}

fn pointer_moved(app: &mut AppState, column: u16, row: u16) {
    app.pointer = Some((column, row));
    app.focus_from_keyboard = false;
    refresh_pointer_hover(app);
}

/// Recomputes hover from the last pointer position and the current layout.
fn refresh_pointer_hover(app: &mut AppState) {
    let Some((column, row)) = app.pointer else {
        return;
    };
    let (width, height) = app.screen;
    let screen = render::screen_layout(Rect::new(0, 0, width, height));
    let position = Position::new(column, row);

    if screen.header.contains(position) {
        app.hovered_title = None;
        app.hovered = header::button_at(
            screen.header,
            &app.portfolio.owner,
            app.portfolio.nav.len(),
            column,
            row,
        )
        .map(Target::Nav);
        return;
    }

    if screen.page.contains(position) {
        let line = app.page.line_at_row(usize::from(row - screen.page.y));
        let col = column - screen.page.x;
        app.hovered = line.and_then(|line| app.page.layout.hit_test(line, col));
        app.hovered_title = line.and_then(|line| app.page.layout.title_at(line));
        return;
    }

    app.hovered = None;
    app.hovered_title = None;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use folio_core::content::Portfolio;
    use folio_core::navigator::{ScrollBehavior, ScrollTrigger};
    use tokio::sync::mpsc;

    use super::*;
    use crate::features::page::{WordBlock, WordId};
    use crate::state::ViewerSettings;

    const WIDTH: u16 = 80;
    const HEIGHT: u16 = 12;

    fn settings() -> ViewerSettings {
        ViewerSettings {
            behavior: ScrollBehavior::Instant,
            ..ViewerSettings::default()
        }
    }

    fn app_with(settings: ViewerSettings) -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::new(Portfolio::builtin().unwrap(), settings, tx);
        update(
            &mut app,
            UiEvent::Frame {
                width: WIDTH,
                height: HEIGHT,
            },
        );
        app
    }

    fn app() -> AppState {
        app_with(settings())
    }

    fn intent(app: &mut AppState, intent: Intent) -> Vec<UiEffect> {
        update(app, UiEvent::Intent(intent))
    }

    fn anchor(app: &AppState, id: &str) -> usize {
        app.page.layout.anchor_line(id).unwrap()
    }

    #[test]
    fn test_init_starts_reveal() {
        let mut app = app();
        assert_eq!(
            init(&mut app),
            vec![UiEffect::StartReveal {
                text: app.portfolio.about.clone()
            }]
        );
        assert!(!app.about_revealed);
    }

    #[test]
    fn test_init_without_typing_reveals_everything() {
        let mut app = app_with(ViewerSettings {
            reveal_enabled: false,
            ..settings()
        });
        assert!(init(&mut app).is_empty());
        assert!(app.about_revealed);
        assert_eq!(app.typed_bytes(), app.portfolio.about.len());
    }

    #[test]
    fn test_shutdown_releases_tracking() {
        let mut app = app();
        intent(&mut app, Intent::ScrollToBottom);
        assert!(!app.highlighter.is_empty());

        shutdown(&mut app);
        assert!(!app.highlighter.is_attached());
        assert!(app.highlighter.is_empty());
        assert!(!app.reveal.is_revealing());

        intent(&mut app, Intent::ScrollToTop);
        intent(&mut app, Intent::ScrollToBottom);
        assert!(app.highlighter.is_empty());
    }

    #[test]
    fn test_nav_scrolls_to_section() {
        let mut app = app();
        intent(&mut app, Intent::ActivateNav(2));
        assert_eq!(
            app.page.scroll.offset(),
            anchor(&app, "projects").min(app.page.scroll.max_offset())
        );

        intent(&mut app, Intent::ActivateNav(0));
        assert_eq!(app.page.scroll.offset(), 0);
    }

    #[test]
    fn test_nav_to_missing_anchor_is_a_no_op() {
        let mut app = app();
        intent(&mut app, Intent::ScrollBy(3));
        intent(&mut app, Intent::ActivateNav(42));
        assert_eq!(app.page.scroll.offset(), 3);
    }

    #[test]
    fn test_smooth_nav_animates_on_ticks() {
        let mut app = app_with(ViewerSettings {
            behavior: ScrollBehavior::Smooth,
            ..settings()
        });
        intent(&mut app, Intent::ActivateNav(3));
        assert_eq!(app.page.scroll.offset(), 0);
        assert!(app.is_animating());

        for _ in 0..100 {
            update(&mut app, UiEvent::Tick);
        }
        assert_eq!(app.page.scroll.offset(), app.page.scroll.target());
        assert!(app.page.scroll.offset() > 0);
    }

    #[test]
    fn test_select_project_expands_and_scrolls_on_mount() {
        let mut app = app();
        intent(&mut app, Intent::SelectProject("project6".into()));

        assert_eq!(app.expanded.as_deref(), Some("project6"));
        let section = anchor(&app, "project6");
        assert_eq!(
            app.page.scroll.offset(),
            section.min(app.page.scroll.max_offset())
        );
        assert!(app.navigator.pending_anchor().is_none());
    }

    #[test]
    fn test_select_project_with_delay_waits_for_tick() {
        let mut app = app_with(ViewerSettings {
            trigger: ScrollTrigger::After(Duration::ZERO),
            ..settings()
        });
        intent(&mut app, Intent::SelectProject("project3".into()));
        assert!(app.page.layout.has_anchor("project3"));
        assert_eq!(app.page.scroll.offset(), 0);

        update(&mut app, UiEvent::Tick);
        assert_eq!(
            app.page.scroll.offset(),
            anchor(&app, "project3").min(app.page.scroll.max_offset())
        );
    }

    #[test]
    fn test_only_one_project_is_expanded() {
        let mut app = app();
        intent(&mut app, Intent::SelectProject("project2".into()));
        intent(&mut app, Intent::SelectProject("project5".into()));
        assert_eq!(app.expanded.as_deref(), Some("project5"));
        assert!(!app.page.layout.has_anchor("project2"));
        assert!(app.page.layout.has_anchor("project5"));
    }

    #[test]
    fn test_unknown_project_is_ignored() {
        let mut app = app();
        intent(&mut app, Intent::SelectProject("project1".into()));
        assert!(app.expanded.is_none());
    }

    #[test]
    fn test_collapse_removes_section() {
        let mut app = app();
        intent(&mut app, Intent::SelectProject("project4".into()));
        intent(&mut app, Intent::CollapseProject);
        assert!(app.expanded.is_none());
        assert!(!app.page.layout.has_anchor("project4"));
    }

    #[test]
    fn test_open_video_uses_player_params() {
        let mut app = app();
        assert!(intent(&mut app, Intent::OpenVideo).is_empty());

        intent(&mut app, Intent::SelectProject("project6".into()));
        assert_eq!(
            intent(&mut app, Intent::OpenVideo),
            vec![UiEffect::OpenUrl {
                url: "https://www.youtube.com/embed/ICmpu_Ul77Y?rel=0&autoplay=0".into()
            }]
        );
    }

    #[test]
    fn test_open_link() {
        let mut app = app();
        assert_eq!(
            intent(&mut app, Intent::OpenLink(0)),
            vec![UiEffect::OpenUrl {
                url: "mailto:johhannmartinez@hotmail.com".into()
            }]
        );
        assert!(intent(&mut app, Intent::OpenLink(9)).is_empty());
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        assert_eq!(intent(&mut app, Intent::Quit), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_hover_button() {
        let mut app = app();
        intent(&mut app, Intent::HoverButton(Some(1)));
        assert_eq!(app.hovered_button(), Some(1));
        intent(&mut app, Intent::HoverButton(None));
        assert_eq!(app.hovered_button(), None);
        intent(&mut app, Intent::HoverButton(Some(99)));
        assert_eq!(app.hovered_button(), None);
    }

    #[test]
    fn test_focus_cycles_through_targets() {
        let mut app = app();
        intent(&mut app, Intent::FocusNext);
        assert_eq!(app.hovered, Some(Target::Nav(0)));

        for _ in 0..4 {
            intent(&mut app, Intent::FocusNext);
        }
        assert_eq!(app.hovered, Some(Target::Project(0)));

        intent(&mut app, Intent::FocusPrev);
        assert_eq!(app.hovered, Some(Target::Nav(3)));
    }

    #[test]
    fn test_focus_scrolls_target_into_view() {
        let mut app = app();
        intent(&mut app, Intent::FocusPrev);
        assert!(matches!(app.hovered, Some(Target::Link(_))));
        let hit = app.page.layout.hit_box(app.hovered.unwrap()).unwrap();
        let offset = app.page.scroll.offset();
        let viewport = app.page.scroll.viewport_height();
        assert!(hit.lines.start >= offset && hit.lines.end <= offset + viewport);
    }

    #[test]
    fn test_activate_focused_project() {
        let mut app = app();
        app.hovered = Some(Target::Project(1));
        intent(&mut app, Intent::ActivateFocus);
        assert_eq!(app.expanded.as_deref(), Some("project3"));
    }

    #[test]
    fn test_pointer_over_header_hovers_button() {
        let mut app = app();
        let rects = header::button_rects(
            Rect::new(0, 0, WIDTH, 1),
            &app.portfolio.owner,
            app.portfolio.nav.len(),
        );
        let about = rects[1];
        intent(
            &mut app,
            Intent::PointerMoved {
                column: about.x + 1,
                row: 0,
            },
        );
        assert_eq!(app.hovered_button(), Some(1));

        intent(&mut app, Intent::PointerMoved { column: 0, row: 0 });
        assert_eq!(app.hovered_button(), None);
    }

    #[test]
    fn test_click_on_nav_button_scrolls() {
        let mut app = app();
        let rects = header::button_rects(
            Rect::new(0, 0, WIDTH, 1),
            &app.portfolio.owner,
            app.portfolio.nav.len(),
        );
        let contact = rects[3];
        intent(
            &mut app,
            Intent::Click {
                column: contact.x,
                row: 0,
            },
        );
        assert_eq!(
            app.page.scroll.offset(),
            anchor(&app, "contact").min(app.page.scroll.max_offset())
        );
    }

    /// Puts the pointer on the middle of the first project tile.
    fn point_at_first_tile(app: &mut AppState) -> (u16, u16) {
        let tile = app.page.layout.hit_box(Target::Project(0)).unwrap().clone();
        intent(app, Intent::ScrollBy(isize::try_from(tile.lines.start).unwrap()));
        let screen = render::screen_layout(Rect::new(0, 0, WIDTH, HEIGHT));
        let row = tile.lines.start + 1 - app.page.scroll.offset();
        let pointer = (
            screen.page.x + tile.cols.start + 1,
            screen.page.y + u16::try_from(row).unwrap(),
        );
        intent(
            app,
            Intent::PointerMoved {
                column: pointer.0,
                row: pointer.1,
            },
        );
        assert_eq!(app.hovered, Some(Target::Project(0)));
        pointer
    }

    #[test]
    fn test_scrolling_under_resting_pointer_updates_hover() {
        let mut app = app();
        let (column, row) = point_at_first_tile(&mut app);

        intent(&mut app, Intent::ScrollBy(6));

        let screen = render::screen_layout(Rect::new(0, 0, WIDTH, HEIGHT));
        let line = app.page.line_at_row(usize::from(row - screen.page.y));
        let under_pointer =
            line.and_then(|line| app.page.layout.hit_test(line, column - screen.page.x));
        assert_eq!(app.hovered, under_pointer);
        assert_ne!(app.hovered, Some(Target::Project(0)));
        assert_eq!(
            app.hovered_title,
            line.and_then(|line| app.page.layout.title_at(line))
        );
    }

    #[test]
    fn test_enter_after_scroll_opens_project_under_pointer() {
        let mut app = app();
        point_at_first_tile(&mut app);
        intent(&mut app, Intent::ScrollBy(6));

        let expected = match app.hovered {
            Some(Target::Project(index)) => Some(app.portfolio.projects[index].id.clone()),
            _ => None,
        };
        intent(&mut app, Intent::ActivateFocus);
        assert_eq!(app.expanded, expected);
        assert_ne!(app.expanded.as_deref(), Some("project2"));
    }

    #[test]
    fn test_keyboard_focus_survives_scrolling() {
        let mut app = app();
        point_at_first_tile(&mut app);

        intent(&mut app, Intent::FocusNext);
        let focused = app.hovered;
        assert_eq!(focused, Some(Target::Project(1)));
        intent(&mut app, Intent::ScrollBy(6));
        assert_eq!(app.hovered, focused);
    }

    #[test]
    fn test_pointer_over_title_hovers_it() {
        let mut app = app();
        let screen = render::screen_layout(Rect::new(0, 0, WIDTH, HEIGHT));
        let about = anchor(&app, "about-me");
        intent(
            &mut app,
            Intent::PointerMoved {
                column: screen.page.x + 3,
                row: screen.page.y + u16::try_from(about).unwrap(),
            },
        );
        assert_eq!(app.hovered_title, app.page.layout.title_at(about));
        assert!(app.hovered_title.is_some());
    }

    #[test]
    fn test_contact_words_highlight_when_scrolled_into_view() {
        let mut app = app();
        let word = WordId {
            block: WordBlock::Contact,
            index: 0,
        };
        assert!(app.highlighter.contains(word));
        assert!(!app.highlighter.is_highlighted(word));

        intent(&mut app, Intent::ScrollToBottom);
        assert!(app.highlighter.is_highlighted(word));

        intent(&mut app, Intent::ScrollToTop);
        assert!(!app.highlighter.is_highlighted(word));
    }

    #[test]
    fn test_about_words_tracked_after_reveal_completes() {
        let mut app = app();
        let word = WordId {
            block: WordBlock::About,
            index: 0,
        };
        assert!(!app.highlighter.contains(word));

        app.about_revealed = true;
        app.page.mark_dirty();
        update(&mut app, UiEvent::Tick);
        assert!(app.highlighter.contains(word));
        assert!(app.highlighter.is_highlighted(word));
    }

    #[test]
    fn test_resize_relayouts_and_keeps_anchor_scroll_valid() {
        let mut app = app();
        intent(&mut app, Intent::ScrollToBottom);
        update(
            &mut app,
            UiEvent::Frame {
                width: 200,
                height: 60,
            },
        );
        assert!(app.page.scroll.offset() <= app.page.scroll.max_offset());
        assert_eq!(app.page.layout.width(), 197);
    }
}
