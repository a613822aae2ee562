use folio_extern_contracts::telegram::{TelegramApiService, TelegramSendMessageError};
use folio_extern_impl::{
    http::HttpClient,
    telegram::{TelegramApiServiceConfig, TelegramApiServiceImpl},
};
use folio_testing::telegram::{SentMessage, TelegramTestServer};
use folio_utils::assert_matches;

const BOT_TOKEN: &str = "123456:test-bot-token";
const CHAT_ID: &str = "4242";

#[tokio::test]
async fn send_message() {
    let (sut, server) = make_sut().await;

    sut.send_message(BOT_TOKEN, CHAT_ID, "Hello World!")
        .await
        .unwrap();

    assert_eq!(
        server.messages().await,
        [SentMessage {
            chat_id: CHAT_ID.into(),
            text: "Hello World!".into(),
        }]
    );
}

#[tokio::test]
async fn send_message_twice() {
    let (sut, server) = make_sut().await;

    for _ in 0..2 {
        sut.send_message(BOT_TOKEN, CHAT_ID, "Same message")
            .await
            .unwrap();
    }

    assert_eq!(server.messages().await.len(), 2);
}

#[tokio::test]
async fn invalid_bot_token() {
    let (sut, server) = make_sut().await;

    let result = sut.send_message("654321:wrong", CHAT_ID, "Hello").await;

    assert_matches!(
        result,
        Err(TelegramSendMessageError::Rejected { status: 401, details })
            if details.contains("Unauthorized")
    );
    assert!(server.messages().await.is_empty());
}

#[tokio::test]
async fn unknown_chat() {
    let (sut, server) = make_sut().await;

    let result = sut.send_message(BOT_TOKEN, "1337", "Hello").await;

    assert_matches!(
        result,
        Err(TelegramSendMessageError::Rejected { status: 400, details })
            if details.contains("chat not found")
    );
    assert!(server.messages().await.is_empty());
}

#[tokio::test]
async fn unreachable_endpoint() {
    let config = TelegramApiServiceConfig::new(Some("http://127.0.0.1:1".parse().unwrap()), None);
    let sut = TelegramApiServiceImpl::new(config, HttpClient::new().unwrap());

    let result = sut.send_message(BOT_TOKEN, CHAT_ID, "Hello").await;

    let err = match result {
        Err(TelegramSendMessageError::Other(err)) => err,
        other => panic!("unexpected result: {other:?}"),
    };
    assert!(!format!("{err:#}").contains(BOT_TOKEN));
}

async fn make_sut() -> (TelegramApiServiceImpl, TelegramTestServer) {
    let server = TelegramTestServer::spawn(BOT_TOKEN, CHAT_ID).await.unwrap();
    let config = TelegramApiServiceConfig::new(Some(server.endpoint().clone()), None);
    let sut = TelegramApiServiceImpl::new(config, HttpClient::new().unwrap());
    (sut, server)
}
