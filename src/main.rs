//! Zellij plugin wrapper and entry point.
//!
//! Thin layer between the `recipe_browser` library and Zellij: it turns Zellij
//! events into library events and carries out the actions the library asks
//! for. All HTTP goes through the host's `web_request`, and all delays through
//! `set_timeout`.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, `WebRequestResult`, `Timer`, `PermissionRequestResult`
//! 3. **Permission granted**: send `Event::Start`, which issues the first fetch;
//!    a denial sends `Event::AccessDenied`, which shows the failure banner
//! 4. **Update**: Handle events, delegate to library layer, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → navigation / filter / pagination events, depending on input mode
//! - `WebRequestResult` → `Event::RecipesFetched` (generation read from the request context)
//! - `Timer` → `Event::Wake`
//!
//! # Keybindings
//!
//! Browsing:
//! - `j`/`Down`/`Ctrl+n`, `k`/`Up`/`Ctrl+p`: Move
//! - `Enter`: Open recipe details
//! - `Esc`: Close details; again to forget the selected recipe
//! - `/` or `f`: Edit filters
//! - `c`: Clear filters
//! - `l`/`Right`/`PageDown`, `h`/`Left`/`PageUp`: Next / previous page
//! - `g`/`Home`, `G`/`End`: First / last page
//! - `+`, `-`: Larger / smaller page size
//! - `r`: Reload
//! - `q`: Close plugin
//!
//! Editing filters:
//! - Characters: Type into the focused field
//! - `Tab`/`Down`/`Ctrl+n`, `Shift+Tab`/`Up`/`Ctrl+p`: Change field
//! - `Enter`: Apply
//! - `Ctrl+x`: Clear all filters
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::time::Instant;
use zellij_tile::prelude::*;

use recipe_browser::api::{parse_response, ResponseContext, TraceContext};
use recipe_browser::{handle_event, Action, Config, Event, InputMode};

register_plugin!(State);

/// Plugin state wrapper.
struct State {
    /// Core application state from library layer.
    app: recipe_browser::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: recipe_browser::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the application state, requests web
    /// access and subscribes to events. The first fetch waits for the
    /// permission result.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        recipe_browser::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_base_url = %config.api_base_url,
            recipes_path = %config.recipes_path,
            page_size = config.page_size,
            "parsed configuration"
        );
        self.app = recipe_browser::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, runs it through `handle_event` and executes
    /// the resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        // Responses continue the trace of the span that sent the request.
        let _parent = Self::response_trace_context(&event)
            .as_ref()
            .and_then(TraceContext::attach);

        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_response(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Wake,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => {
                    tracing::debug!("web access granted - starting");
                    Event::Start
                }
                PermissionStatus::Denied => {
                    tracing::warn!("web access denied - recipes cannot be fetched");
                    Event::AccessDenied
                }
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        recipe_browser::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Handles one library event and executes its actions.
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event, Instant::now()) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                let mut render = should_render;
                for action in actions {
                    render |= self.execute_action(&action);
                }
                render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn response_trace_context(event: &zellij_tile::prelude::Event) -> Option<TraceContext> {
        match event {
            zellij_tile::prelude::Event::WebRequestResult(_, _, _, context) => {
                ResponseContext::parse(context)?.trace_context
            }
            _ => None,
        }
    }

    /// Decodes a recipe API response. Returns `None` for responses to
    /// requests this plugin did not tag.
    fn map_web_response(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(response) = ResponseContext::parse(context) else {
            tracing::debug!("ignoring web response without a fetch generation");
            return None;
        };

        tracing::debug!(
            generation = response.generation,
            status = status,
            body_len = body.len(),
            "recipe response received"
        );
        Some(Event::RecipesFetched {
            generation: response.generation,
            result: parse_response(status, body),
        })
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        match self.app.input_mode {
            InputMode::Browse => self.map_browse_key(key),
            InputMode::EditingFilters => Self::map_filter_key(key),
        }
    }

    fn map_browse_key(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::SelectRecipe,
            BareKey::Esc if self.app.controller.selection().is_open() => Event::CloseDetail,
            BareKey::Esc if self.app.controller.selection().recipe().is_some() => Event::ClearSelection,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('/' | 'f') => Event::EditFilters,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Right | BareKey::PageDown | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::PageUp | BareKey::Char('h') => Event::PrevPage,
            BareKey::Home | BareKey::Char('g') => Event::FirstPage,
            BareKey::End | BareKey::Char('G') => Event::LastPage,
            BareKey::Char('+' | '=') => Event::IncreaseLimit,
            BareKey::Char('-') => Event::DecreaseLimit,
            BareKey::Char('r') => Event::Retry,
            _ => return None,
        })
    }

    fn map_filter_key(key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::NextField),
                BareKey::Char('p') => Some(Event::PrevField),
                BareKey::Char('x') => Some(Event::ClearFilters),
                _ => None,
            };
        }
        if key.bare_key == BareKey::Tab && key.has_modifiers(&[KeyModifier::Shift]) {
            return Some(Event::PrevField);
        }

        Some(match key.bare_key {
            BareKey::Tab | BareKey::Down => Event::NextField,
            BareKey::Up => Event::PrevField,
            BareKey::Enter => Event::SubmitFilters,
            BareKey::Esc => Event::CancelFilters,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    /// Executes an action returned from event handling. Returns `true` if
    /// executing it changed state that needs a re-render.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) -> bool {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
                false
            }
            Action::Fetch(ticket) => match self.app.api.build_request(ticket) {
                Ok(request) => {
                    tracing::debug!(url = %request.url, generation = ticket.generation, "sending recipe request");
                    web_request(
                        request.url,
                        HttpVerb::Get,
                        request.headers,
                        vec![],
                        request.context,
                    );
                    false
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to build recipe request");
                    self.dispatch(&Event::RecipesFetched {
                        generation: ticket.generation,
                        result: Err(e),
                    })
                }
            },
            Action::ScheduleWake(delay) => {
                tracing::debug!(delay = ?delay, "scheduling wake");
                set_timeout(delay.as_secs_f64());
                false
            }
        }
    }
}
