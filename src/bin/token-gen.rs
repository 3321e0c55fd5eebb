use clap::Parser;

use menu_service::config::decode_secret;
use menu_service::services::auth::TokenCodec;

/// Issue an HS256 bearer token accepted by the menu service.
///
/// The secret is read from `JWT_SECRET` (base64, `.env` honoured), the same
/// variable the server uses.
#[derive(Parser, Debug)]
#[command(name = "token-gen", version, about)]
struct Args {
    /// Subject (`sub` claim), e.g. the username
    #[arg(long)]
    sub: String,

    /// Role to embed; repeat for several (e.g. --role ADMIN --role USER)
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl: i64,

    /// Print the decoded claims as well
    #[arg(long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let raw = std::env::var("JWT_SECRET").map_err(|_| "JWT_SECRET is not set")?;
    let secret = decode_secret(&raw)?;

    let codec = TokenCodec::new(&secret, 0);
    let token = codec.issue(&args.sub, &args.roles, args.ttl)?;

    if !args.verbose {
        println!("{}", token);
        return Ok(());
    }

    let claims = codec.decode(&token)?;
    println!("token: {}", token);
    println!("sub: {}", claims.subject);
    println!(
        "roles: {}",
        claims
            .roles
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",")
    );
    if let Some(exp) = claims.expires_at {
        println!("exp: {}", exp);
    }

    Ok(())
}
