use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::StatusCode;
use services::{
    Advance, BankConfig, HttpRequest, HttpTransport, QuestionBankClient, QuizSession,
    SessionError, SessionPhase, TransportError,
};

/// Serves canned bank responses keyed by the `type` query value.
struct FakeBank {
    boolean_available: bool,
    multiple_available: bool,
    requests: AtomicUsize,
}

impl FakeBank {
    fn new(multiple_available: bool, boolean_available: bool) -> Arc<Self> {
        Arc::new(Self {
            boolean_available,
            multiple_available,
            requests: AtomicUsize::new(0),
        })
    }
}

fn body(kind: &str, amount: usize) -> String {
    let results: Vec<String> = (0..amount)
        .map(|i| {
            if kind == "boolean" {
                format!(
                    r#"{{"type":"boolean","category":"Science","question":"Statement {i} &quot;holds&quot;","correct_answer":"True","incorrect_answers":["False"]}}"#
                )
            } else {
                format!(
                    r#"{{"type":"multiple","category":"History","question":"Question {i}?","correct_answer":"Right {i}","incorrect_answers":["Wrong {i}a","Wrong {i}b","Wrong {i}c"]}}"#
                )
            }
        })
        .collect();
    format!(r#"{{"response_code":0,"results":[{}]}}"#, results.join(","))
}

#[async_trait]
impl HttpTransport for FakeBank {
    async fn get(&self, request: HttpRequest) -> Result<Vec<u8>, TransportError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        assert!(request.bypass_cache);

        let mut kind = String::new();
        let mut amount = 0;
        for (key, value) in request.url.query_pairs() {
            match key.as_ref() {
                "type" => kind = value.into_owned(),
                "amount" => amount = value.parse().unwrap(),
                _ => {}
            }
        }

        let available = match kind.as_str() {
            "multiple" => self.multiple_available,
            "boolean" => self.boolean_available,
            _ => false,
        };
        if available {
            Ok(body(&kind, amount).into_bytes())
        } else {
            Err(TransportError::Status(StatusCode::SERVICE_UNAVAILABLE))
        }
    }
}

fn session_over(bank: Arc<FakeBank>) -> QuizSession {
    let client = QuestionBankClient::new(bank, BankConfig::default());
    let builder = client.config().option_builder();
    QuizSession::new(Arc::new(client)).with_option_builder(builder)
}

#[tokio::test]
async fn full_session_plays_to_final_score() {
    let bank = FakeBank::new(true, true);
    let mut session = session_over(bank.clone());

    session.start().unwrap();
    assert_eq!(session.wait_loaded().await.unwrap(), 15);
    assert_eq!(bank.requests.load(Ordering::SeqCst), 2);

    let mut expected = 0;
    loop {
        let current = session.current_question().unwrap();
        let answer = if current.options.is_binary() {
            // Raw, undecoded text is what gets submitted.
            assert!(current.question.prompt().contains("&quot;"));
            expected += 1;
            current.options.correct_option().to_string()
        } else {
            current
                .options
                .options()
                .iter()
                .find(|option| option.starts_with("Wrong"))
                .cloned()
                .unwrap()
        };

        session.submit_answer(&answer).unwrap();
        match session.advance().unwrap() {
            Advance::Next { .. } => continue,
            Advance::Finished(score) => {
                assert_eq!(score.correct, expected);
                assert_eq!(score.total, 15);
                break;
            }
        }
    }

    assert_eq!(expected, 5);
    assert_eq!(session.phase(), SessionPhase::Finished);
}

#[tokio::test]
async fn multiple_choice_outage_gives_short_session() {
    let mut session = session_over(FakeBank::new(false, true));
    session.start().unwrap();
    assert_eq!(session.wait_loaded().await.unwrap(), 5);
}

#[tokio::test]
async fn total_outage_is_an_empty_deck() {
    let mut session = session_over(FakeBank::new(false, false));
    session.start().unwrap();
    assert_eq!(session.wait_loaded().await, Err(SessionError::EmptyDeck));
    assert_eq!(session.phase(), SessionPhase::Failed);
}

#[tokio::test]
async fn restart_refetches_from_the_bank() {
    let bank = FakeBank::new(true, true);
    let mut session = session_over(bank.clone());
    session.start().unwrap();
    session.wait_loaded().await.unwrap();

    session.restart().unwrap();
    session.wait_loaded().await.unwrap();
    assert_eq!(bank.requests.load(Ordering::SeqCst), 4);
    assert_eq!(session.correct_count(), 0);
}
