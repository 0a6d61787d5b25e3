//! Navigation policy integration tests.

use tempguard::navigation::{
    host_matches, NavigationRequest, NavigationTrigger, NewWindowAction, PolicyConfig,
    PolicyDecision, PolicyEngine, QueryMarker, ServiceIdentity, ServiceRules,
};
use url::Url;

fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

fn clicked(s: &str) -> NavigationRequest {
    NavigationRequest::new(url(s)).trigger(NavigationTrigger::LinkActivated)
}

fn redirected(s: &str) -> NavigationRequest {
    NavigationRequest::new(url(s))
}

#[test]
fn test_disallowed_schemes_cancelled() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    for raw in [
        "file:///etc/passwd",
        "javascript:alert(1)",
        "data:text/html,hi",
        "ftp://chatgpt.com/x",
        "about:blank",
    ] {
        assert_eq!(
            engine.decide_raw(raw, true, NavigationTrigger::LinkActivated),
            PolicyDecision::Cancel,
            "{raw}"
        );
        // Scheme check precedes the frame check.
        assert_eq!(
            engine.decide_raw(raw, false, NavigationTrigger::Other),
            PolicyDecision::Cancel,
            "{raw}"
        );
    }
}

#[test]
fn test_subframes_always_allowed() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    for raw in [
        "https://ads.tracker.example/frame",
        "https://chatgpt.com/c/123",
        "https://chatgpt.com/",
    ] {
        let request = clicked(raw).main_frame(false);
        assert_eq!(engine.decide(&request), PolicyDecision::Allow, "{raw}");
    }
}

#[test]
fn test_suffix_matching() {
    assert!(host_matches("chatgpt.com", "chatgpt.com"));
    assert!(host_matches("cdn.oaistatic.com", "oaistatic.com"));
    assert!(!host_matches("evil-chatgpt.com", "chatgpt.com"));
    assert!(!host_matches("chatgpt.com.evil.net", "chatgpt.com"));

    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    assert!(engine.is_external_domain(&url("https://evil-chatgpt.com/")));
    assert!(!engine.is_external_domain(&url("https://files.oaiusercontent.com/x.png")));
}

#[test]
fn test_chatgpt_home_requires_marker() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    assert_eq!(
        engine.decide(&redirected("https://chatgpt.com/")),
        PolicyDecision::ForceReset
    );
    assert_eq!(
        engine.decide(&redirected("https://chatgpt.com/?temporary-chat=true")),
        PolicyDecision::Allow
    );
    assert_eq!(
        engine.decide(&redirected("https://chatgpt.com/?model=gpt-4o&temporary-chat=true")),
        PolicyDecision::Allow
    );
    assert_eq!(
        engine.decide(&redirected("https://chatgpt.com/?temporary-chat=false")),
        PolicyDecision::ForceReset
    );
}

#[test]
fn test_chatgpt_history_paths_reset() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    for raw in [
        "https://chatgpt.com/c/6789-abcd",
        "https://chatgpt.com/c/6789-abcd?temporary-chat=true",
        "https://chatgpt.com/library",
        "https://chatgpt.com/share/xyz",
    ] {
        assert_eq!(engine.decide(&clicked(raw)), PolicyDecision::ForceReset, "{raw}");
    }
}

#[test]
fn test_chatgpt_passthrough_paths() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    assert_eq!(
        engine.decide(&redirected("https://chatgpt.com/auth/login")),
        PolicyDecision::Allow
    );
    assert_eq!(
        engine.decide(&redirected("https://chatgpt.com/api/auth/callback")),
        PolicyDecision::Allow
    );
}

#[test]
fn test_login_flow_allowed() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    for raw in [
        "https://auth.openai.com/authorize?client_id=x",
        "https://accounts.google.com/o/oauth2/auth",
        "https://login.live.com/oauth20_authorize.srf",
        "https://appleid.apple.com/auth/authorize",
    ] {
        assert_eq!(engine.decide(&redirected(raw)), PolicyDecision::Allow, "{raw}");
    }
}

#[test]
fn test_unknown_host() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    let target = "https://en.wikipedia.org/wiki/Rust";

    assert_eq!(
        engine.decide(&clicked(target)),
        PolicyDecision::PromptExternal(url(target))
    );
    assert_eq!(engine.decide(&redirected(target)), PolicyDecision::ForceReset);
}

#[test]
fn test_gemini_same_domain_free() {
    let engine = PolicyEngine::new(ServiceIdentity::Gemini);
    assert_eq!(engine.entry_url().as_str(), "https://gemini.google.com/app");
    for raw in [
        "https://gemini.google.com/",
        "https://gemini.google.com/app/abc123",
    ] {
        assert_eq!(engine.decide(&clicked(raw)), PolicyDecision::Allow, "{raw}");
    }
    assert!(engine.content_rules().is_empty());
}

#[test]
fn test_route_change() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    assert_eq!(
        engine.decide_route_change(&url("https://chatgpt.com/c/abc")),
        Some(PolicyDecision::ForceReset)
    );
    assert_eq!(
        engine.decide_route_change(&url("https://chatgpt.com/?temporary-chat=true")),
        None
    );
    assert_eq!(engine.decide_route_change(&url("https://example.com/")), None);
}

#[test]
fn test_new_window() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);

    let external = url("https://example.com/docs");
    assert_eq!(
        engine.decide_new_window(&external, NavigationTrigger::Other),
        NewWindowAction::PromptExternal(external.clone())
    );

    let login = url("https://auth.openai.com/log-in");
    assert_eq!(
        engine.decide_new_window(&login, NavigationTrigger::LinkActivated),
        NewWindowAction::LoadInPlace(login.clone())
    );

    assert_eq!(
        engine.decide_new_window(&url("https://chatgpt.com/c/abc"), NavigationTrigger::LinkActivated),
        NewWindowAction::LoadInPlace(engine.entry_url().clone())
    );

    assert_eq!(
        engine.decide_new_window(&url("mailto:someone@example.com"), NavigationTrigger::LinkActivated),
        NewWindowAction::Ignore
    );
}

#[test]
fn test_custom_service_rules() {
    let rules = ServiceRules::new(ServiceIdentity::Gemini, url("https://gemini.google.com/app"))
        .history_prefix("/saved/")
        .temporary_marker(QueryMarker::new("incognito", "1"));
    let engine = PolicyEngine::with_config(
        ServiceIdentity::Gemini,
        PolicyConfig::new().service(rules),
    );

    assert_eq!(
        engine.decide(&clicked("https://gemini.google.com/saved/1")),
        PolicyDecision::ForceReset
    );
    assert_eq!(
        engine.decide(&clicked("https://gemini.google.com/")),
        PolicyDecision::ForceReset
    );
    assert_eq!(
        engine.decide(&clicked("https://gemini.google.com/?incognito=1")),
        PolicyDecision::Allow
    );
}

#[test]
fn test_set_config_takes_effect() {
    let mut engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    let docs = "https://docs.example.org/guide";
    assert_eq!(engine.decide(&redirected(docs)), PolicyDecision::ForceReset);

    engine.set_config(PolicyConfig::new().allow_host("example.org"));
    assert_eq!(engine.decide(&redirected(docs)), PolicyDecision::Allow);
}

#[test]
fn test_content_rules_json() {
    let engine = PolicyEngine::new(ServiceIdentity::ChatGpt);
    let json = engine.content_rules().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let rules = value.as_array().unwrap();
    assert_eq!(rules.len(), 2);
    for rule in rules {
        assert_eq!(rule["action"]["type"], "block");
        assert!(rule["trigger"]["url-filter"]
            .as_str()
            .unwrap()
            .starts_with("https://chatgpt.com/backend-api/conversation"));
    }
}

#[test]
fn test_engine_is_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PolicyEngine>();
}
