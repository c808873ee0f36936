use crate::{FormFields, Message, PollFailure, PollReply};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Controller is up: start the first poll cycle and the initial scroll.
    Started,
    /// Messages already present on the page before polling began.
    HistoryLoaded(Vec<Message>),
    /// The scheduled delay before the next poll elapsed.
    PollDue,
    /// The in-flight updates request resolved with a usable reply.
    PollSucceeded(PollReply),
    /// The in-flight updates request failed at transport or protocol level.
    PollFailed(PollFailure),
    /// The in-flight request of `cycle` has been pending past the waiting threshold.
    WaitingThresholdElapsed { cycle: u64 },
    /// User submitted the composer form.
    SubmitRequested(FormFields),
    /// The new-message endpoint echoed the stored message.
    SubmitSucceeded(Message),
    /// The new-message request failed.
    SubmitFailed(String),
    FocusGained,
    FocusLost,
    /// User moved the viewport.
    Scrolled { scroll_y: u32 },
    /// Visible height changed.
    Resized { client_rows: u32 },
    /// One step of the smooth scroll catch-up.
    ScrollTick,
}
