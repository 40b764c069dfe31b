//! Document-level keydown hook feeding the [`ScanClassifier`].
//!
//! Listens in the capture phase so scanner digits can be swallowed before
//! the focused input sees them. Dropping the listener removes the handler and
//! cancels the pending quiet-window timer.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, KeyboardEvent};

use super::scan_classifier::{KeyDecision, KeyStroke, ScanClassifier};
use crate::shared::config::ScannerConfig;

pub struct ScanListener {
    document: Document,
    classifier: Rc<RefCell<ScanClassifier>>,
    quiet_timer: Rc<RefCell<Option<Timeout>>>,
    handler: Closure<dyn FnMut(KeyboardEvent)>,
}

impl ScanListener {
    /// Starts listening; `on_scan` receives every completed scan.
    ///
    /// Returns `None` outside a browser document.
    pub fn attach(config: ScannerConfig, on_scan: impl Fn(String) + 'static) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let classifier = Rc::new(RefCell::new(ScanClassifier::new(config)));
        let quiet_timer: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

        let handler = {
            let classifier = classifier.clone();
            let quiet_timer = quiet_timer.clone();
            Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let stroke = KeyStroke {
                    key: &key,
                    with_modifier: event.ctrl_key() || event.meta_key() || event.alt_key(),
                };
                let decision = classifier
                    .borrow_mut()
                    .on_key_down(stroke, js_sys::Date::now());

                if decision.swallows() {
                    event.prevent_default();
                    event.stop_propagation();
                }

                match decision {
                    KeyDecision::PassThrough => {}
                    KeyDecision::Buffered { .. } => {
                        let window_ms = classifier.borrow().quiet_window_ms();
                        let expiring = classifier.clone();
                        // replacing the previous Timeout cancels it
                        *quiet_timer.borrow_mut() = Some(Timeout::new(window_ms, move || {
                            expiring.borrow_mut().expire();
                        }));
                    }
                    KeyDecision::Scanned(code) => {
                        quiet_timer.borrow_mut().take();
                        on_scan(code);
                    }
                }
            })
        };

        document
            .add_event_listener_with_callback_and_bool(
                "keydown",
                handler.as_ref().unchecked_ref(),
                true,
            )
            .ok()?;
        log::debug!("scan listener attached");

        Some(Self {
            document,
            classifier,
            quiet_timer,
            handler,
        })
    }
}

impl Drop for ScanListener {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            "keydown",
            self.handler.as_ref().unchecked_ref(),
            true,
        );
        self.quiet_timer.borrow_mut().take();
        self.classifier.borrow_mut().reset();
        log::debug!("scan listener detached");
    }
}
