use crate::client::ApiClient;
use crate::error::LoginError;
use crate::models::{Credentials, TokenResponse};
use crate::session::SessionState;
use crate::transport::ApiRequest;

pub const TOKEN_PATH: &str = "/api/token/";

/// Exchanges credentials for an access token. On success the token is handed
/// to the session, which persists it and notifies subscribers. On failure the
/// stored token and session state are left as they were.
pub async fn login(client: &ApiClient, credentials: &Credentials) -> Result<SessionState, LoginError> {
    let request = ApiRequest::post(TOKEN_PATH)
        .json(credentials)
        .map_err(|_| LoginError::InvalidCredentials)?;

    let response = client
        .fetch(request)
        .await
        .map_err(LoginError::Unreachable)?;

    if !response.ok() {
        log::info!("login rejected with status {}", response.status);
        return Err(LoginError::InvalidCredentials);
    }

    let token = response
        .json::<TokenResponse>()
        .ok()
        .and_then(|body| body.access)
        .filter(|token| !token.is_empty())
        .ok_or(LoginError::InvalidCredentials)?;

    Ok(client.session().login(&token))
}

pub fn logout(client: &ApiClient) -> SessionState {
    client.session().logout()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::executor::block_on;

    use super::*;
    use crate::config::AppConfig;
    use crate::error::TransportError;
    use crate::session::Session;
    use crate::storage::{MemoryStore, TokenStore};
    use crate::transport::testing::ScriptedTransport;

    fn setup(transport: ScriptedTransport) -> (ApiClient, Rc<MemoryStore>, Rc<ScriptedTransport>) {
        let store = Rc::new(MemoryStore::default());
        let transport = Rc::new(transport);
        let client = ApiClient::new(
            AppConfig::default(),
            Session::new(store.clone()),
            transport.clone(),
        );
        (client, store, transport)
    }

    fn credentials() -> Credentials {
        Credentials {
            username: "ana".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn valid_login_stores_token() {
        let (client, store, transport) =
            setup(ScriptedTransport::default().reply(200, r#"{"access":"abc","refresh":"r"}"#));
        let states = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let states = states.clone();
            client
                .session()
                .subscribe(move |state| states.borrow_mut().push(state))
        };

        let state = block_on(login(&client, &credentials())).unwrap();

        assert_eq!(state, SessionState::Authenticated);
        assert_eq!(store.get().as_deref(), Some("abc"));
        assert_eq!(*states.borrow(), vec![SessionState::Authenticated]);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url, TOKEN_PATH);
        assert_eq!(
            sent.body.as_deref(),
            Some(r#"{"username":"ana","password":"secret"}"#)
        );
    }

    #[test]
    fn rejected_login_leaves_session_alone() {
        let (client, store, _) = setup(
            ScriptedTransport::default().reply(401, r#"{"detail":"No active account"}"#),
        );

        let err = block_on(login(&client, &credentials())).unwrap_err();

        assert_eq!(err, LoginError::InvalidCredentials);
        assert_eq!(store.get(), None);
        assert_eq!(client.session().state(), SessionState::Unauthenticated);
    }

    #[test]
    fn ok_without_access_is_rejected() {
        let (client, store, _) = setup(ScriptedTransport::default().reply(200, "{}"));
        let err = block_on(login(&client, &credentials())).unwrap_err();
        assert_eq!(err, LoginError::InvalidCredentials);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn unreachable_server_is_reported() {
        let (client, _, _) = setup(ScriptedTransport::default().fail("offline"));
        let err = block_on(login(&client, &credentials())).unwrap_err();
        assert_eq!(err, LoginError::Unreachable(TransportError("offline".into())));
    }

    #[test]
    fn logout_clears_token() {
        let (client, store, _) = setup(ScriptedTransport::default());
        client.session().login("abc");
        assert_eq!(logout(&client), SessionState::Unauthenticated);
        assert_eq!(store.get(), None);
    }
}
