//! Cashier login / logout.

use puntos_client::LoyaltyClient;

use super::prompt_line;

pub async fn login(
    client: &LoyaltyClient,
    username: &str,
    password: Option<String>,
) -> anyhow::Result<()> {
    let password = match password {
        Some(p) => p,
        None => prompt_line("Password")?,
    };

    let token = client.login(username, &password).await?;
    match token.expires_at {
        Some(exp) => println!(
            "Logged in as {} (session valid until {})",
            username,
            exp.format("%Y-%m-%d %H:%M")
        ),
        None => println!("Logged in as {}", username),
    }
    Ok(())
}

pub async fn logout(client: &LoyaltyClient) -> anyhow::Result<()> {
    client.logout().await;
    println!("Logged out");
    Ok(())
}
