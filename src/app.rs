use crate::application::DestinationResolver;
use crate::domain::{SaveOutcome, TrackDescriptor};
use crate::ui::{SaveMessage, SaveView};
use futures::{Stream, StreamExt};
use iced::Task;

pub struct SaveApp {
    view: SaveView,
    resolver: DestinationResolver,
}

impl SaveApp {
    pub fn new(resolver: DestinationResolver) -> Self {
        Self {
            view: SaveView::default(),
            resolver,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    UiMessage(SaveMessage),
    /// Download progress (0 to 100)
    SaveProgress(u8),
    /// Final result of the folder prompt and download
    SaveFinished(Result<SaveOutcome, String>),
}

pub fn update(app: &mut SaveApp, message: Message) -> Task<Message> {
    match message {
        Message::UiMessage(ui_msg) => {
            app.view.update(ui_msg.clone());

            if let SaveMessage::SavePressed = ui_msg {
                if !app.view.is_saving {
                    let track = app.view.track_descriptor();

                    app.view.is_saving = true;
                    app.view.progress = 0;
                    app.view.status_message = "Please select a folder...".to_string();

                    return Task::stream(save_events(app.resolver.clone(), track));
                }
            }
        }
        Message::SaveProgress(percent) => {
            // Progress can trail the final result on the merged stream.
            if app.view.is_saving {
                app.view.progress = percent;
                app.view.status_message = format!("Downloading: {}%", percent);
            }
        }
        Message::SaveFinished(result) => {
            app.view.is_saving = false;
            app.view.progress = 0;
            app.view.status_message = match result {
                Ok(SaveOutcome::Saved(path)) => format!("Saved: {}", path.display()),
                Ok(SaveOutcome::Cancelled) => "Save cancelled".to_string(),
                Err(e) => format!("Save failed: {}", e),
            };
        }
    }
    Task::none()
}

/// Progress updates followed by the final outcome, as one message stream.
fn save_events(
    resolver: DestinationResolver,
    track: TrackDescriptor,
) -> impl Stream<Item = Message> + Send + 'static {
    let (progress_tx, progress_rx) = futures::channel::mpsc::unbounded();

    let finished = futures::stream::once(async move {
        let result = resolver
            .save_track(track, Some(progress_tx))
            .await
            .map_err(|e| e.to_string());
        Message::SaveFinished(result)
    });

    futures::stream::select(progress_rx.map(Message::SaveProgress), finished)
}

pub fn view(app: &SaveApp) -> iced::Element<'_, Message> {
    app.view.view().map(Message::UiMessage)
}
