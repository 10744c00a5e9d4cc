//! Command implementations.

use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use quill_application::{
    ApiClient, ContentService, CredentialStatus, CredentialStore, ensure_success,
};
use quill_domain::{
    ApiRequest, CaseConverter, ClientSettings, CollisionPolicy, Credential, DomainResult, KeyCase,
    Payload,
};
use quill_infrastructure::{
    FileCredentialStore, ReqwestTransport, SettingsRepository, from_json_bytes, to_json_stable,
};
use tokio::io::AsyncReadExt;

use crate::cli::{CliArgs, Command, ConvertArgs};

type CommandResult = Result<(), Box<dyn Error>>;

/// Runs the parsed command.
pub async fn run(args: CliArgs) -> CommandResult {
    match args.command {
        Command::Normalize(ref convert) => convert_command(convert, KeyCase::Camel).await,
        Command::Denormalize(ref convert) => convert_command(convert, KeyCase::Snake).await,
        Command::Get { ref path } => get(&Context::load(&args).await?, path).await,
        Command::Login {
            ref token,
            expires_in,
        } => login(&Context::load(&args).await?, token, expires_in).await,
        Command::Logout => {
            Context::load(&args).await?.store.clear().await?;
            println!("{}", CredentialStatus::Missing.display_message());
            Ok(())
        }
        Command::Sync { status } => sync(&Context::load(&args).await?, status).await,
    }
}

/// Converts the keys of a JSON document and renders it as stable JSON.
///
/// # Errors
///
/// Returns an error if the input is not JSON or a strict conversion hits a
/// collision.
pub fn convert_document(input: &[u8], case: KeyCase, strict: bool) -> Result<String, Box<dyn Error>> {
    let payload: Payload = from_json_bytes(input)?;
    let converter = if strict {
        CaseConverter::strict()
    } else {
        CaseConverter::new(CollisionPolicy::LastWins)
    };
    let converted = match case {
        KeyCase::Camel => converter.normalize(&payload)?,
        KeyCase::Snake => converter.denormalize(&payload)?,
    };
    Ok(to_json_stable(&converted)?)
}

async fn convert_command(args: &ConvertArgs, case: KeyCase) -> CommandResult {
    let input = read_input(args.file.as_deref()).await?;
    print!("{}", convert_document(&input, case, args.strict)?);
    Ok(())
}

async fn read_input(file: Option<&Path>) -> std::io::Result<Vec<u8>> {
    if let Some(path) = file {
        return tokio::fs::read(path).await;
    }
    let mut input = Vec::new();
    tokio::io::stdin().read_to_end(&mut input).await?;
    Ok(input)
}

/// Settings, credential store and client for the network commands.
struct Context {
    store: Arc<FileCredentialStore>,
    client: ApiClient<ReqwestTransport>,
}

impl Context {
    async fn load(args: &CliArgs) -> Result<Self, Box<dyn Error>> {
        let repo = args
            .config
            .as_ref()
            .map_or_else(SettingsRepository::new, SettingsRepository::at);
        let mut settings: ClientSettings = repo.load().await?;
        if let Some(base_url) = &args.base_url {
            settings.base_url.clone_from(base_url);
            settings.validate()?;
        }
        tracing::debug!(base_url = %settings.base_url, "settings loaded");

        let store = Arc::new(match &args.credentials {
            Some(path) => FileCredentialStore::new(path),
            None => FileCredentialStore::default_location()?,
        });
        let transport = Arc::new(ReqwestTransport::new(&settings)?);
        let client = ApiClient::standard(settings, transport, store.clone());

        Ok(Self { store, client })
    }
}

async fn get(ctx: &Context, path: &str) -> CommandResult {
    let response = ensure_success(ctx.client.send(ApiRequest::get(path)).await?)?;
    match response.payload() {
        Some(payload) => print!("{}", to_json_stable(payload)?),
        None => println!(
            "{} bytes ({})",
            response.raw_len().unwrap_or_default(),
            response.content_type().unwrap_or("no content type")
        ),
    }
    Ok(())
}

/// Builds the credential stored by `login`.
///
/// # Errors
///
/// Returns `DomainError::InvalidExpiry` if the lifetime is out of range.
pub fn login_credential(token: &str, expires_in: Option<i64>) -> DomainResult<Credential> {
    let credential = Credential::bearer(token);
    match expires_in {
        Some(seconds) => credential.expires_in(seconds),
        None => Ok(credential),
    }
}

async fn login(ctx: &Context, token: &str, expires_in: Option<i64>) -> CommandResult {
    let credential = login_credential(token, expires_in)?;
    ctx.store.save(&credential).await?;
    tracing::info!(path = %ctx.store.path().display(), "credential stored");
    println!("{}", CredentialStatus::of(Some(&credential)).display_message());
    Ok(())
}

async fn sync(ctx: &Context, status_only: bool) -> CommandResult {
    let service = ContentService::new(ctx.client.clone());
    let run = if status_only {
        service.sync_status().await?
    } else {
        service.trigger_sync().await?
    };
    print!("{}", to_json_stable(&run)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_normalize_document() {
        let out = convert_document(br#"{"post_id": 1, "tags": [{"tag_name": "x"}]}"#, KeyCase::Camel, false).unwrap();
        assert_eq!(
            out,
            "{\n  \"postId\": 1,\n  \"tags\": [\n    {\n      \"tagName\": \"x\"\n    }\n  ]\n}\n"
        );
    }

    #[test]
    fn test_denormalize_document() {
        let out = convert_document(br#"{"firstName": "Ada"}"#, KeyCase::Snake, false).unwrap();
        assert_eq!(out, "{\n  \"first_name\": \"Ada\"\n}\n");
    }

    #[test]
    fn test_strict_reports_collision() {
        let input = br#"{"user_id": 1, "userId": 2}"#;
        assert!(convert_document(input, KeyCase::Camel, true).is_err());

        let out = convert_document(input, KeyCase::Camel, false).unwrap();
        assert_eq!(out, "{\n  \"userId\": 2\n}\n");
    }

    #[test]
    fn test_login_credential_lifetime() {
        let credential = login_credential("abc", Some(60)).unwrap();
        assert_eq!(credential.authorization(), "Bearer abc");
        assert!(credential.expires_at.is_some());

        assert!(login_credential("abc", None).unwrap().expires_at.is_none());
    }

    #[test]
    fn test_login_rejects_huge_lifetime() {
        let err = login_credential("abc", Some(i64::MAX)).unwrap_err();
        assert_eq!(err, quill_domain::DomainError::InvalidExpiry(i64::MAX));
    }

    #[test]
    fn test_invalid_input() {
        assert!(convert_document(b"{nope", KeyCase::Camel, false).is_err());
    }
}
