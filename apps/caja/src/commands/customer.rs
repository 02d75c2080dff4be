//! Member account flows, as the mobile app runs them.

use clap::Subcommand;
use puntos_client::{LoyaltyClient, Registration};
use puntos_core::qr::customer_qr_payload;
use puntos_core::Customer;

use super::prompt_line;

#[derive(Subcommand, Debug)]
pub enum CustomerCommand {
    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "PUNTOS_CUSTOMER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Create a member account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, env = "PUNTOS_CUSTOMER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Check whether an email has an account
    CheckEmail { email: String },
    /// Set or reset a member's password
    SetPassword {
        email: String,
        #[arg(long, env = "PUNTOS_CUSTOMER_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Find a member by email, creating the account if it is new
    Identify {
        email: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

fn password_or_prompt(password: Option<String>) -> anyhow::Result<String> {
    match password {
        Some(p) => Ok(p),
        None => prompt_line("Password"),
    }
}

fn print_customer(customer: &Customer) {
    println!("#{} {} <{}>", customer.id, customer.name, customer.email);
    if let Some(phone) = &customer.phone {
        println!("Phone:    {}", phone);
    }
    if let Some(sap) = &customer.sap_code {
        println!("SAP code: {}", sap);
    }
    println!("QR:       {}", customer_qr_payload(customer.id));
}

pub async fn run(client: &LoyaltyClient, command: CustomerCommand) -> anyhow::Result<()> {
    match command {
        CustomerCommand::Login { email, password } => {
            let password = password_or_prompt(password)?;
            let customer = client.customer_login(&email, &password).await?;
            print_customer(&customer);
        }
        CustomerCommand::Register {
            name,
            email,
            phone,
            password,
        } => {
            let registration = Registration {
                name,
                email,
                phone,
                password: password_or_prompt(password)?,
            };
            let customer = client.register_customer(&registration).await?;
            println!("Account created.");
            print_customer(&customer);
        }
        CustomerCommand::CheckEmail { email } => {
            if client.check_email(&email).await? {
                println!("{} has an account.", email);
            } else {
                println!("{} is not registered.", email);
            }
        }
        CustomerCommand::SetPassword { email, password } => {
            let password = password_or_prompt(password)?;
            client.set_password(&email, &password).await?;
            println!("Password updated.");
        }
        CustomerCommand::Identify { email, name, phone } => {
            let customer = client
                .identify(&email, name.as_deref(), phone.as_deref())
                .await?;
            print_customer(&customer);
        }
    }
    Ok(())
}
