//! Decode session state machine

/// Decode session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeState {
    /// No decode in progress
    #[default]
    Idle,
    /// Sink prepared, palette not yet loaded
    Prepared,
    /// Pixel data is being drawn
    Streaming,
    /// All pixels drawn and the sink finished
    Done,
    /// Session aborted; the file has been closed
    Error,
}

/// Events that move a decode session between states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeEvent {
    /// Sink accepted the image
    Prepare,
    /// Palette loaded and stream positioned at the pixel data
    StartStream,
    /// Last pixel drawn and sink finished
    Finish,
    /// I/O, format or sink failure
    Fail,
    /// New image opened or file closed
    Reset,
}

impl DecodeState {
    /// Check if pixels are being produced
    pub fn is_active(&self) -> bool {
        matches!(self, DecodeState::Prepared | DecodeState::Streaming)
    }

    /// Check if this is the error state
    pub fn is_error(&self) -> bool {
        matches!(self, DecodeState::Error)
    }

    /// Process an event and return the next state
    ///
    /// Events that make no sense in the current state leave it unchanged.
    pub fn transition(self, event: DecodeEvent) -> Self {
        use DecodeEvent::*;
        use DecodeState::*;

        match (self, event) {
            (_, Reset) => Idle,
            (_, Fail) => Error,

            // A finished image may be drawn again
            (Idle | Done, Prepare) => Prepared,
            (Prepared, StartStream) => Streaming,
            (Streaming, Finish) => Done,

            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_flow() {
        let state = DecodeState::Idle
            .transition(DecodeEvent::Prepare)
            .transition(DecodeEvent::StartStream);
        assert_eq!(state, DecodeState::Streaming);
        assert!(state.is_active());
        assert_eq!(state.transition(DecodeEvent::Finish), DecodeState::Done);
    }

    #[test]
    fn test_fail_from_any_state() {
        for state in [
            DecodeState::Idle,
            DecodeState::Prepared,
            DecodeState::Streaming,
            DecodeState::Done,
        ] {
            assert!(state.transition(DecodeEvent::Fail).is_error());
        }
    }

    #[test]
    fn test_redraw_after_done() {
        assert_eq!(
            DecodeState::Done.transition(DecodeEvent::Prepare),
            DecodeState::Prepared
        );
    }

    #[test]
    fn test_invalid_events_ignored() {
        assert_eq!(
            DecodeState::Idle.transition(DecodeEvent::Finish),
            DecodeState::Idle
        );
        assert_eq!(
            DecodeState::Error.transition(DecodeEvent::Prepare),
            DecodeState::Error
        );
        assert_eq!(
            DecodeState::Error.transition(DecodeEvent::Reset),
            DecodeState::Idle
        );
    }
}
