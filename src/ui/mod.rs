use iced::{
    widget::{button, column, progress_bar, text, text_input, Space},
    Element, Length,
};

use crate::domain::{AudioSource, TrackDescriptor};

/// Main view state
pub struct SaveView {
    pub audio_link: String,
    pub title: String,
    pub artist: String,
    pub status_message: String,
    pub is_saving: bool,
    pub progress: u8,
}

impl Default for SaveView {
    fn default() -> Self {
        Self {
            audio_link: String::new(),
            title: String::new(),
            artist: String::new(),
            status_message: "Enter a track link to save it locally".to_string(),
            is_saving: false,
            progress: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub enum SaveMessage {
    AudioLinkChanged(String),
    TitleChanged(String),
    ArtistChanged(String),
    SavePressed,
}

impl SaveView {
    pub fn update(&mut self, message: SaveMessage) {
        match message {
            SaveMessage::AudioLinkChanged(link) => self.audio_link = link,
            SaveMessage::TitleChanged(title) => self.title = title,
            SaveMessage::ArtistChanged(artist) => self.artist = artist,
            SaveMessage::SavePressed => {
                // Will be handled by the app
            }
        }
    }

    pub fn track_descriptor(&self) -> TrackDescriptor {
        let field = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        TrackDescriptor {
            audio: Some(AudioSource {
                link: field(&self.audio_link),
            }),
            title: field(&self.title),
            artist_name: field(&self.artist),
            artist: None,
        }
    }

    pub fn view(&self) -> Element<'_, SaveMessage> {
        column![
            text("Local Track Saver").size(32),
            Space::new().height(Length::Fixed(20.0)),
            text("Audio link:").size(16),
            text_input("https://...", &self.audio_link)
                .on_input(SaveMessage::AudioLinkChanged)
                .padding(10),
            text("Title:").size(16),
            text_input("Optional", &self.title)
                .on_input(SaveMessage::TitleChanged)
                .padding(10),
            text("Artist:").size(16),
            text_input("Optional", &self.artist)
                .on_input(SaveMessage::ArtistChanged)
                .padding(10),
            Space::new().height(Length::Fixed(10.0)),
            progress_bar(0.0..=100.0, f32::from(self.progress)),
            text(&self.status_message).size(14),
            Space::new().height(Length::Fixed(20.0)),
            button("Save to Folder...")
                .on_press_maybe((!self.is_saving).then_some(SaveMessage::SavePressed))
                .padding([10, 20]),
        ]
        .padding(20)
        .spacing(10)
        .into()
    }
}
