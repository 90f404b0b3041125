mod google_speech_client;

pub use google_speech_client::GoogleSpeechClient;
