// src/util/audio/mod.rs
use rodio::{Decoder, OutputStream, Sink};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::thread;

use crate::log_error;

pub trait AudioPlayer {
    fn play(&mut self, path: &str) -> Result<(), String>;
    fn stop(&mut self, path: &str) -> Result<(), String>;
}

/// Plays through the default output device.
struct SpeakerPlayer {
    volume: f32,
    active_sinks: Arc<Mutex<HashMap<String, Arc<Sink>>>>,
}

impl SpeakerPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            active_sinks: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl AudioPlayer for SpeakerPlayer {
    fn play(&mut self, path: &str) -> Result<(), String> {
        if !Path::new(path).exists() {
            return Err(format!("audio file not found: {}", path));
        }

        let path = path.to_string();
        let volume = self.volume;
        let sinks = Arc::clone(&self.active_sinks);

        // Kill prior play of same path
        if let Some(old) = sinks.lock().map_err(|e| e.to_string())?.remove(&path) {
            old.stop();
        }

        thread::spawn(move || {
            // OutputStream is not Send on every platform, so it lives on this thread
            let (_stream, handle) = match OutputStream::try_default() {
                Ok(v) => v,
                Err(e) => {
                    log_error!("Failed to create audio stream: {}", e);
                    return;
                }
            };

            let sink = match Sink::try_new(&handle) {
                Ok(s) => s,
                Err(e) => {
                    log_error!("Failed to create sink: {}", e);
                    return;
                }
            };

            sink.set_volume(volume);

            let file = match File::open(&path) {
                Ok(f) => f,
                Err(e) => {
                    log_error!("Failed to open audio file {}: {}", path, e);
                    return;
                }
            };

            let source = match Decoder::new(BufReader::new(file)) {
                Ok(s) => s,
                Err(e) => {
                    log_error!("Failed to decode audio file {}: {}", path, e);
                    return;
                }
            };

            sink.append(source);

            let sink = Arc::new(sink);
            if let Ok(mut active) = sinks.lock() {
                active.insert(path.clone(), Arc::clone(&sink));
            }

            sink.sleep_until_end();

            if let Ok(mut active) = sinks.lock() {
                active.remove(&path);
            }
        });

        Ok(())
    }

    fn stop(&mut self, path: &str) -> Result<(), String> {
        match self.active_sinks.lock().map_err(|e| e.to_string())?.remove(path) {
            Some(sink) => {
                sink.stop();
                Ok(())
            }
            None => Err("No playback active".to_string()),
        }
    }
}

/// For headless runs and when the alert sound is disabled.
struct SilentPlayer;

impl AudioPlayer for SilentPlayer {
    fn play(&mut self, _: &str) -> Result<(), String> { Ok(()) }
    fn stop(&mut self, _: &str) -> Result<(), String> { Ok(()) }
}

/// A single sound bound to a player, cheap to clone.
#[derive(Clone)]
pub struct Chime {
    inner: Arc<Mutex<dyn AudioPlayer + Send>>,
    path: String,
}

impl std::fmt::Debug for Chime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chime")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl Chime {
    pub fn new_with_speaker(path: &str, volume: f32) -> Self {
        Self::with_player(path, SpeakerPlayer::new(volume))
    }

    pub fn silent() -> Self {
        Self::with_player("", SilentPlayer)
    }

    pub fn with_player<P: AudioPlayer + Send + 'static>(path: &str, player: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(player)),
            path: path.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn play(&self) -> Result<(), String> {
        self.inner.lock().map_err(|e| e.to_string())?.play(&self.path)
    }

    pub fn stop(&self) -> Result<(), String> {
        self.inner.lock().map_err(|e| e.to_string())?.stop(&self.path)
    }
}
