use std::time::Duration;

use crate::{FormFields, Message, MessageId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the updates request. `cursor` is omitted on the first cycle.
    FetchUpdates { cursor: Option<MessageId> },
    /// Deliver `Msg::PollDue` after `after`; zero means "next turn of the loop".
    SchedulePoll { after: Duration },
    /// Deliver `Msg::WaitingThresholdElapsed { cycle }` after `after`.
    ArmWaitingTimer { cycle: u64, after: Duration },
    /// Append a message to the transcript.
    RenderMessage(Message),
    SetTitle(String),
    /// Show the transient status line.
    ShowInfo(String),
    HideInfo,
    ScrollTo(u32),
    /// Deliver `Msg::ScrollTick` after `after`.
    ScheduleScrollTick { after: Duration },
    /// Post the composer form to the new-message endpoint.
    SubmitMessage { fields: FormFields },
    SetComposerEnabled(bool),
    ClearComposer,
}
