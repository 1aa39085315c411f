//! End-to-end tests of the library API.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use request_intl::{
    FormatterContext, Intl, IntlConfig, LoadRequest, LocaleMessages, LocaleSignals, MessageMap,
    RequestContext, t,
};

fn hello_messages() -> LocaleMessages {
    let mut locales = LocaleMessages::new();
    locales.insert("en-US".into(), [("hello".to_string(), "Hello World".to_string())].into());
    locales.insert("zh-CN".into(), [("hello".to_string(), "你好世界".to_string())].into());
    locales
}

#[tokio::test]
async fn test_default_messages_per_locale() {
    let config = IntlConfig::builder()
        .default_locale("en-US")
        .default_messages(hello_messages())
        .build();
    let intl = Intl::new(config).await.unwrap();

    let en = intl.create_formatter_context("en-US", None).await;
    let zh = intl.create_formatter_context("zh-CN", Some("global")).await;

    assert_eq!(en.translate("hello", None), "Hello World");
    assert_eq!(zh.translate("hello", None), "你好世界");
    assert_eq!(intl.translate("hello", None), "Hello World");
}

#[tokio::test]
async fn test_accept_list_rejects_unlisted_locale() {
    let config = IntlConfig::builder()
        .accept_language("en-US,zh-CN")
        .default_locale("en-US")
        .build();
    let intl = Intl::new(config).await.unwrap();

    let mut rejected = http::Request::builder()
        .uri("/test")
        .header("accept-language", "fr-FR")
        .body(())
        .unwrap();
    let mut accepted = http::Request::builder()
        .uri("/test")
        .header("accept-language", "zh-CN")
        .body(())
        .unwrap();

    assert_eq!(intl.localize(&mut rejected).await.locale, "en-US");
    assert_eq!(intl.localize(&mut accepted).await.locale, "zh-CN");
}

#[tokio::test]
async fn test_localized_request_translates() {
    let mut locales = LocaleMessages::new();
    locales.insert("en-US".into(), [("greeting".to_string(), "Hello {name}!".to_string())].into());
    let intl = Intl::new(IntlConfig::builder().default_messages(locales).build()).await.unwrap();

    let mut request = http::Request::builder().uri("/test").body(()).unwrap();
    intl.localize(&mut request).await;

    let ctx = request.extensions().get::<FormatterContext>().unwrap();
    assert_eq!(ctx.locale, "en-US");
    assert_eq!(t!(ctx, "greeting", "name" => "John"), "Hello John!");
}

#[tokio::test]
async fn test_query_language_parameter() {
    let intl = Intl::new(IntlConfig::default()).await.unwrap();
    let mut request = http::Request::builder().uri("/test?language=zh-CN").body(()).unwrap();

    assert_eq!(intl.localize(&mut request).await.locale, "zh-CN");
}

#[tokio::test]
async fn test_formatters_are_shared() {
    let intl = Intl::new(IntlConfig::builder().cache_size(10).build()).await.unwrap();

    let first = intl.create_formatter_context("en-US", Some("global")).await;
    let second = intl.create_formatter_context("en-US", Some("global")).await;
    let other = intl.create_formatter_context("zh-CN", Some("global")).await;

    assert!(Arc::ptr_eq(&first.formatter, &second.formatter));
    assert!(!Arc::ptr_eq(&first.formatter, &other.formatter));
}

#[tokio::test]
async fn test_remote_messages_loaded_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let intl = Arc::new(
        Intl::builder(IntlConfig::default())
            .remote_loader(move |request: LoadRequest| {
                let counter = Arc::clone(&counter);
                async move {
                    if request.module == "test" {
                        counter.fetch_add(1, Ordering::SeqCst);
                    }
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    let mut messages = MessageMap::new();
                    messages.insert("dynamic".into(), "Dynamic message".into());
                    Ok::<_, std::io::Error>(messages)
                }
            })
            .build()
            .await
            .unwrap(),
    );

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let intl = Arc::clone(&intl);
            tokio::spawn(async move { intl.create_formatter_context("en-US", Some("test")).await })
        })
        .collect();
    for handle in handles {
        let ctx = handle.await.unwrap();
        assert_eq!(ctx.translate("dynamic", None), "Dynamic message");
    }

    let again = intl.create_formatter_context("en-US", Some("test")).await;
    assert_eq!(again.translate("dynamic", None), "Dynamic message");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_request_context_memoization() {
    let intl = Intl::new(IntlConfig::builder().accept_language("de-DE").build()).await.unwrap();
    let request = RequestContext::new(
        "req-42",
        LocaleSignals::new().with_header("x-client-language", "de-DE"),
    );

    let ctx = intl.with_locale(&request, None).await;
    assert_eq!(ctx.locale, "de-DE");
    assert_eq!(intl.resolve_locale(&request), "de-DE");
    assert_eq!(request.id(), "req-42");
}

#[tokio::test]
async fn test_namespaced_ids_and_literal_braces() {
    let mut locales = LocaleMessages::new();
    locales.insert(
        "en-US".into(),
        [
            ("app.title", "Dashboard"),
            ("common:ok", "OK"),
            ("json.example", "Send {} or { \"key\": 1 }"),
            ("menu.items", "  * {count} items\n* none}"),
        ]
        .into_iter()
        .map(|(id, template)| (id.to_string(), template.to_string()))
        .collect(),
    );
    let intl = Intl::new(IntlConfig::builder().default_messages(locales).build()).await.unwrap();

    let ctx = intl.create_formatter_context("en-US", Some("global")).await;
    assert_eq!(ctx.formatter.len(), 4);
    assert_eq!(ctx.translate("app.title", None), "Dashboard");
    assert_eq!(ctx.translate("common:ok", None), "OK");
    assert_eq!(ctx.translate("json.example", None), "Send {} or { \"key\": 1 }");
    assert_eq!(t!(ctx, "menu.items", "count" => "3"), "  * 3 items\n* none}");
    assert_eq!(intl.translate("app.title", None), "Dashboard");
}

#[tokio::test]
async fn test_request_context_from_http() {
    let intl = Intl::new(IntlConfig::builder().accept_language("en-US,zh-CN").build())
        .await
        .unwrap();
    let request = http::Request::builder()
        .uri("/orders?page=1")
        .header("cookie", "session=abc; x-user-locale=zh%2DCN")
        .header("accept-language", "en-US")
        .body(())
        .unwrap();

    let context = RequestContext::from_http("req-7", &request);
    assert_eq!(context.id(), "req-7");
    assert_eq!(context.signals().cookie("x-user-locale"), Some("zh-CN"));
    assert_eq!(intl.resolve_locale(&context), "zh-CN");
    assert_eq!(intl.with_locale(&context, None).await.locale, "zh-CN");
}
