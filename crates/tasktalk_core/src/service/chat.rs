//! Chat transcript session.
//!
//! # Responsibility
//! - Funnel every user submission through one handler, whatever UI trigger
//!   produced it.
//! - Render both sides of each exchange through a `Render` implementation.
//!
//! # Invariants
//! - One submission produces exactly one dispatcher call.
//! - Submissions after termination are dropped without rendering.

use crate::repo::task_repo::TaskRepository;
use crate::service::assistant::{Assistant, SessionState};
use log::debug;

/// Author of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// Presentation capability consumed by the session.
pub trait Render {
    fn render(&mut self, text: &str, sender: Sender);
}

impl<V: Render + ?Sized> Render for &mut V {
    fn render(&mut self, text: &str, sender: Sender) {
        (**self).render(text, sender);
    }
}

/// Binds an assistant to a view.
pub struct ChatSession<R: TaskRepository, V: Render> {
    assistant: Assistant<R>,
    view: V,
}

impl<R: TaskRepository, V: Render> ChatSession<R, V> {
    /// Renders the greeting and load notices, then waits for input.
    pub fn open(assistant: Assistant<R>, mut view: V) -> Self {
        view.render(&assistant.greeting(), Sender::Assistant);
        for notice in assistant.startup_notices() {
            view.render(notice, Sender::Assistant);
        }
        Self { assistant, view }
    }

    /// Handles one user submission.
    pub fn submit(&mut self, input: &str) -> SessionState {
        if self.assistant.state() == SessionState::Terminated {
            debug!("event=chat_submit module=service status=dropped reason=terminated");
            return SessionState::Terminated;
        }

        self.view.render(input, Sender::User);
        let reply = self.assistant.get_response(input);
        self.view.render(&reply, Sender::Assistant);
        self.assistant.state()
    }

    pub fn state(&self) -> SessionState {
        self.assistant.state()
    }

    pub fn assistant(&self) -> &Assistant<R> {
        &self.assistant
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_parts(self) -> (Assistant<R>, V) {
        (self.assistant, self.view)
    }
}
