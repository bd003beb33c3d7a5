use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;
use iced::Event;
use iced::Task;
use iced::event;
use iced::keyboard;
use iced::window;
use tracing::{debug, info};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchBatch { dispatch, options } => {
                let client = self.client.clone();
                debug!(
                    ticket = %dispatch.ticket,
                    kind = %dispatch.kind,
                    limit = options.limit,
                    page = ?options.page,
                    "Dispatching image fetch task"
                );
                Task::perform(
                    async move {
                        let result = client.fetch_items(&options).await;
                        Message::BatchLoaded { dispatch, result }
                    },
                    |message| message,
                )
            }
            Effect::Quit => {
                info!("Quit requested");
                iced::exit()
            }
        }
    }
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
