use clap::Parser;
use invest_client::{InvestClientHttp, InvestClientTrait};

#[derive(Parser, Debug)]
#[clap(about = "Manage users, accounts and stocks of the investment aggregator")]
struct Cli {
    #[clap(short, long, default_value = "http://127.0.0.1:8080")]
    server: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    CreateUser {
        #[clap(long)]
        username: String,
        #[clap(long)]
        email: String,
        #[clap(long)]
        password: String,
    },
    GetUser {
        id: String,
    },
    ListUsers,
    UpdateUser {
        id: String,
        #[clap(long)]
        username: Option<String>,
        #[clap(long)]
        password: Option<String>,
    },
    DeleteUser {
        id: String,
    },
    CreateAccount {
        user_id: String,
        #[clap(long)]
        description: String,
        #[clap(long)]
        street: String,
        #[clap(long)]
        number: i32,
    },
    ListAccounts {
        user_id: String,
    },
    CreateStock {
        #[clap(long)]
        stock_id: String,
        #[clap(long)]
        description: String,
    },
    AssociateStock {
        account_id: String,
        #[clap(long)]
        stock_id: String,
        #[clap(long)]
        quantity: i32,
    },
    ListAccountStocks {
        account_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let client = InvestClientHttp::connect(&args.server).await?;
    run(&client, args.command).await
}

async fn run(client: &dyn InvestClientTrait, command: Command) -> anyhow::Result<()> {
    match command {
        Command::CreateUser {
            username,
            email,
            password,
        } => {
            let id = client.create_user(username, email, password).await?;
            println!("User created! ID: {}", id);
        }
        Command::GetUser { id } => match client.get_user(&id).await? {
            Some(user) => println!("{}", user),
            None => println!("User {} not found", id),
        },
        Command::ListUsers => {
            let users = client.list_users().await?;
            println!("Users ({})", users.len());
            for user in users {
                println!("- {}", user);
            }
        }
        Command::UpdateUser {
            id,
            username,
            password,
        } => {
            client.update_user(&id, username, password).await?;
            println!("Update sent for user {}", id);
        }
        Command::DeleteUser { id } => {
            client.delete_user(&id).await?;
            println!("Delete sent for user {}", id);
        }
        Command::CreateAccount {
            user_id,
            description,
            street,
            number,
        } => {
            client
                .create_account(&user_id, description, street, number)
                .await?;
            println!("Account created for user {}", user_id);
        }
        Command::ListAccounts { user_id } => {
            let accounts = client.list_accounts(&user_id).await?;
            println!("Accounts ({})", accounts.len());
            for account in accounts {
                println!("- [{}] {}", account.account_id, account.description);
            }
        }
        Command::CreateStock {
            stock_id,
            description,
        } => {
            client.create_stock(stock_id.clone(), description).await?;
            println!("Stock {} registered", stock_id);
        }
        Command::AssociateStock {
            account_id,
            stock_id,
            quantity,
        } => {
            client
                .associate_stock(&account_id, stock_id.clone(), quantity)
                .await?;
            println!("{} x{} associated with account {}", stock_id, quantity, account_id);
        }
        Command::ListAccountStocks { account_id } => {
            let positions = client.list_account_stocks(&account_id).await?;
            for position in positions {
                println!("- {} x{}", position.stock_id, position.quantity);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_update_with_optional_fields() {
        let cli = Cli::try_parse_from(["invest-cli", "update-user", "abc", "--username", "neo"])
            .unwrap();
        match cli.command {
            Command::UpdateUser {
                id,
                username,
                password,
            } => {
                assert_eq!(id, "abc");
                assert_eq!(username.as_deref(), Some("neo"));
                assert!(password.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.server, "http://127.0.0.1:8080");
    }
}
