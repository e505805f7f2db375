mod client;
mod transport;
mod wire;

pub use client::QuestionBankClient;
pub use transport::{HttpRequest, HttpTransport, ReqwestTransport};
