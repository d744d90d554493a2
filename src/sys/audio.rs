use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use strum::{Display as StrumDisplay, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Cue {
    Startup,
    Home,
    Confirmation,
    Reject,
}

impl Cue {
    pub fn file_name(&self) -> String {
        format!("{self}.wav")
    }

    pub fn path(&self, audio_dir: &Path) -> PathBuf {
        audio_dir.join(self.file_name())
    }

    pub fn missing(audio_dir: &Path) -> Vec<Cue> {
        Cue::iter()
            .filter(|cue| !cue.path(audio_dir).exists())
            .collect()
    }
}

/// Best-effort feedback sounds. Failures are logged, never returned.
pub trait CuePlayer {
    fn play(&self, cue: Cue);
}

pub struct SilentCuePlayer;

impl CuePlayer for SilentCuePlayer {
    fn play(&self, cue: Cue) {
        log::debug!("Sound disabled, skipping cue '{}'", cue);
    }
}

/// Plays one cue at a time; a new cue cuts off the previous one.
pub struct MediaCuePlayer {
    audio_dir: PathBuf,
    current: RefCell<Option<gtk::MediaFile>>,
}

impl MediaCuePlayer {
    pub fn new(audio_dir: PathBuf) -> Self {
        let missing = Cue::missing(&audio_dir);
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(Cue::file_name).collect();
            log::warn!(
                "Missing sounds in {}: {}",
                audio_dir.display(),
                names.join(", ")
            );
        }
        Self {
            audio_dir,
            current: RefCell::new(None),
        }
    }
}

impl CuePlayer for MediaCuePlayer {
    fn play(&self, cue: Cue) {
        let path = cue.path(&self.audio_dir);
        if !path.exists() {
            log::warn!("Sound not found for cue '{}': {}", cue, path.display());
            return;
        }

        if let Some(previous) = self.current.borrow_mut().take() {
            previous.pause();
        }

        let media = gtk::MediaFile::for_filename(&path);
        media.connect_error_notify(|m| {
            if let Some(e) = m.error() {
                log::error!("Error playing sound: {}", e);
            }
        });
        media.play();

        self.current.replace(Some(media));
    }
}
