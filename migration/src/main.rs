use migration::{
    mint_lock::MintLocks,
    settings::{mint_arg, Settings},
    Client, Error,
};

#[tokio::main]
pub async fn main() -> Result<(), Error> {
    env_logger::init();

    let settings = Settings::from_env()?;
    let mint = mint_arg()?;
    let client = Client::from_settings(settings)?;
    log::info!("payer: {}", client.payer());

    let locks = MintLocks::new();
    let report = migration::migrate_exclusive(&client, &locks, mint).await?;
    println!("Transaction ID: {}", report.lock_pool);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
