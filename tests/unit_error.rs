/// Unit tests for DiError and DiResult types

use ferrous_injector::{DiError, DiResult, Symbol, Token};
use std::error::Error;

#[test]
fn test_error_display_unresolved() {
    let error = DiError::Unresolved(Token::from("NUM"));
    assert_eq!(error.to_string(), "Unresolved token: \"NUM\"");

    let error = DiError::Unresolved(Token::from(Symbol::new("config")));
    assert_eq!(error.to_string(), "Unresolved token: Symbol(config)");

    let error = DiError::Unresolved(Token::of::<String>());
    assert_eq!(error.to_string(), "Unresolved token: alloc::string::String");
}

#[test]
fn test_error_display_manifest_unavailable() {
    let error = DiError::ManifestUnavailable("app::Receiver".to_string());
    assert_eq!(error.to_string(), "No dependency manifest available for: app::Receiver");
}

#[test]
fn test_error_display_invalid_provider() {
    let error = DiError::InvalidProvider("no binding given");
    assert_eq!(error.to_string(), "Invalid provider: no binding given");
}

#[test]
fn test_error_display_duplicate_binding() {
    let error = DiError::DuplicateBinding(Token::from("db"));
    assert_eq!(error.to_string(), "Token already bound: \"db\"");
}

#[test]
fn test_error_display_global_already_set() {
    assert_eq!(DiError::GlobalAlreadySet.to_string(), "Global injector already set");
}

#[test]
fn test_error_display_circular() {
    let path = vec!["ServiceA".to_string(), "ServiceB".to_string(), "ServiceA".to_string()];
    let error = DiError::Circular(path);
    assert_eq!(error.to_string(), "Circular dependency: ServiceA -> ServiceB -> ServiceA");
}

#[test]
fn test_error_display_depth_exceeded() {
    assert_eq!(DiError::DepthExceeded(1024).to_string(), "Max depth 1024 exceeded");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("std::string::String");
    assert_eq!(error.to_string(), "Type mismatch for: std::string::String");
}

#[test]
fn test_error_display_missing_argument() {
    let error = DiError::MissingArgument {
        target: "app::Receiver".to_string(),
        index: 1,
    };
    assert_eq!(error.to_string(), "Missing argument 1 for: app::Receiver");
}

#[test]
fn test_error_is_std_error() {
    let error: Box<dyn Error + Send + Sync> = Box::new(DiError::GlobalAlreadySet);
    assert!(error.source().is_none());
}

#[test]
fn test_error_clone_preserves_variant() {
    let error = DiError::Unresolved(Token::from("x"));
    assert!(matches!(error.clone(), DiError::Unresolved(t) if t == Token::from("x")));
}

#[test]
fn test_di_result_propagates() {
    fn inner() -> DiResult<u8> {
        Err(DiError::DepthExceeded(1))
    }

    fn outer() -> DiResult<u8> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(DiError::DepthExceeded(1))));
}
