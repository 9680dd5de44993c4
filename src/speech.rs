//! Speech rendering
//!
//! One reply per `ResponseState`. A reply is either speech or a directive,
//! never both: the platform rejects speech next to a `Connections.SendRequest`.

use crate::alexa::{Directive, ResponseEnvelope};
use crate::state_machine::ResponseState;
use serde_json::Value;

const ASK_MINUTES_REPROMPT: &str = "カップ麺にお湯を入れたら時間を教えてください。";
const NEED_TIMER_SPEAK: &str =
    "私はタイマーがないと、あなたのお役(やく)に立てません。タイマーをオンにしてくれるとうれしいです。";
const HELP_SPEAK: &str = "カップ麺にお湯を入れて私を呼び出してください。どん兵衛を固めで食べたかったら、「アレクサ、カップ麺タイマーを開いて、どん兵衛を固めで」、と言ってください。";
const ASK_AGAIN_REPROMPT: &str = "もう一度教えてください。";

/// Spoken part of a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speak: String,
    /// Empty means no reprompt
    pub reprompt: String,
    /// `None` leaves the decision to the platform
    pub should_end_session: Option<bool>,
}

impl Utterance {
    fn new(speak: impl Into<String>, reprompt: impl Into<String>, should_end_session: Option<bool>) -> Self {
        Self {
            speak: speak.into(),
            reprompt: reprompt.into(),
            should_end_session,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Speech(Utterance),
    Directive(Directive),
    /// Nothing to say (session already over)
    Silent,
}

impl Reply {
    pub fn into_envelope(self, session_attributes: Value) -> ResponseEnvelope {
        match self {
            Reply::Speech(utterance) => ResponseEnvelope::speech(
                &utterance.speak,
                &utterance.reprompt,
                utterance.should_end_session,
                session_attributes,
            ),
            Reply::Directive(directive) => ResponseEnvelope::directive(directive, session_attributes),
            Reply::Silent => ResponseEnvelope::empty(session_attributes),
        }
    }
}

pub fn render(state: &ResponseState) -> Reply {
    let utterance = match state {
        ResponseState::AskPermission(directive) => return Reply::Directive(directive.clone()),
        ResponseState::SessionEnded => return Reply::Silent,

        ResponseState::Greet { first_visit: true } => Utterance::new(
            "こんにちは。カップ麺タイマーです。カップ麺にお湯を入れたら、アレクサ、カップ麺タイマーを起動して、５分ね。と、私を呼び出してください。「固め」、「やわらかめ」と言うこともできますよ？",
            ASK_MINUTES_REPROMPT,
            Some(false),
        ),
        ResponseState::Greet { first_visit: false } => Utterance::new(
            "こんにちは。カップ麺タイマーです。今日はどんなカップ麺を食べますか？",
            ASK_MINUTES_REPROMPT,
            Some(false),
        ),

        ResponseState::PermissionAccepted => Utterance::new(
            "タイマーを有効にしました。今日のカップ麺楽しんでください。",
            "さあ、カップ麺、作りましょう",
            Some(false),
        ),
        ResponseState::PermissionCardSent => Utterance::new(
            "Alexaアプリに、このスキルがタイマーを使用することを許可するためのカードを送りました。権限を許可した後に、もう一度このスキルを呼び出してください。",
            "タイマーを使うためのカードを送りました。",
            Some(true),
        ),
        ResponseState::PermissionRequired => Utterance::new(
            NEED_TIMER_SPEAK,
            "私を使う場合は、タイマーを有効にしてください",
            Some(true),
        ),

        ResponseState::TimerStarted {
            noodle,
            softness_display,
        } => Utterance::new(
            format!("{noodle} を {softness_display} ですね？ できたらお知らせしますね？"),
            "",
            Some(true),
        ),
        ResponseState::TimerFailed { noodle } => Utterance::new(
            format!("{noodle} の タイマー を開始できませんでした。ごめんなさい。"),
            "もう一回トライしてみてください。",
            Some(true),
        ),

        ResponseState::Exit => {
            Utterance::new("またカップ麺食べたくなったら呼んでくださいね？", "", Some(true))
        }
        ResponseState::Help | ResponseState::Unhandled => Utterance::new(HELP_SPEAK, "", None),
        ResponseState::Fallback => Utterance::new(
            "すみません。聞き取れませんでした。もう一度教えてください。",
            ASK_AGAIN_REPROMPT,
            None,
        ),
        ResponseState::ErrorRecoverable => Utterance::new(
            "今から食べるカップ麺の時間を教えてください。終了するには「とめて」と言ってください。",
            ASK_AGAIN_REPROMPT,
            Some(false),
        ),
        ResponseState::ErrorUnrecoverable => Utterance::new(
            "すみません。聞き取れませんでした。もう一度教えてください。終了するには「とめて」と言ってください。",
            ASK_AGAIN_REPROMPT,
            Some(false),
        ),
    };
    Reply::Speech(utterance)
}
