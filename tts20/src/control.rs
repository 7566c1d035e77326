/// Trait for speech output devices that support runtime playback control.
///
/// Every method returns `Ok(true)` when the device acknowledged the request
/// and `Ok(false)` when it did not answer as expected.
pub trait SpeechControl {
    /// Error type for control operations.
    type Error;

    /// Synthesize `text` and start playing it.
    fn speak(&mut self, text: &str) -> Result<bool, Self::Error>;

    /// Stop playback and discard the rest of the text.
    fn stop(&mut self) -> Result<bool, Self::Error>;

    /// Pause playback; [`resume`](Self::resume) continues where it left off.
    fn pause(&mut self) -> Result<bool, Self::Error>;

    /// Resume paused playback.
    fn resume(&mut self) -> Result<bool, Self::Error>;

    /// Whether the device is still synthesizing or playing.
    fn is_busy(&mut self) -> Result<bool, Self::Error>;
}
