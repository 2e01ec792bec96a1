use std::sync::Arc;

use tracing::instrument;
use uuid::Uuid;

use crate::data::account_repository::AccountRepository;
use crate::data::stock_repository::StockRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::account::{Account, AccountStock};
use crate::domain::{error::DomainError, parse_id};
use crate::presentation::dto::{AssociateStockRequest, CreateAccountRequest};

pub struct AccountService<U, A, S>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    users: Arc<U>,
    accounts: Arc<A>,
    stocks: Arc<S>,
}

impl<U, A, S> Clone for AccountService<U, A, S>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            accounts: Arc::clone(&self.accounts),
            stocks: Arc::clone(&self.stocks),
        }
    }
}

impl<U, A, S> AccountService<U, A, S>
where
    U: UserRepository + 'static,
    A: AccountRepository + 'static,
    S: StockRepository + 'static,
{
    pub fn new(users: Arc<U>, accounts: Arc<A>, stocks: Arc<S>) -> Self {
        Self {
            users,
            accounts,
            stocks,
        }
    }

    #[instrument(skip(self, input))]
    pub async fn create_account(
        &self,
        user_id: &str,
        input: CreateAccountRequest,
    ) -> Result<Uuid, DomainError> {
        let user_id = self.existing_user(user_id).await?;
        let account = Account::new(user_id, input.description, input.street, input.number);
        let saved = self.accounts.save(account).await?;
        Ok(saved.account_id)
    }

    pub async fn list_accounts(&self, user_id: &str) -> Result<Vec<Account>, DomainError> {
        let user_id = self.existing_user(user_id).await?;
        self.accounts.find_by_user(user_id).await
    }

    #[instrument(skip(self))]
    pub async fn associate_stock(
        &self,
        account_id: &str,
        input: AssociateStockRequest,
    ) -> Result<AccountStock, DomainError> {
        let account_id = parse_id(account_id)?;
        let stock_id = input.stock_id.trim().to_string();
        if input.quantity <= 0 {
            return Err(DomainError::Validation(
                "quantity must be greater than zero".into(),
            ));
        }

        self.existing_account(account_id).await?;
        if self.stocks.find_by_id(stock_id.clone()).await?.is_none() {
            return Err(DomainError::StockNotFound(stock_id));
        }

        self.accounts
            .save_stock(AccountStock {
                account_id,
                stock_id,
                quantity: input.quantity,
            })
            .await
    }

    pub async fn list_account_stocks(
        &self,
        account_id: &str,
    ) -> Result<Vec<AccountStock>, DomainError> {
        let account_id = parse_id(account_id)?;
        self.existing_account(account_id).await?;
        self.accounts.find_stocks(account_id).await
    }

    async fn existing_user(&self, raw: &str) -> Result<Uuid, DomainError> {
        let user_id = parse_id(raw)?;
        if !self.users.exists_by_id(user_id).await? {
            return Err(DomainError::UserNotFound(user_id));
        }
        Ok(user_id)
    }

    async fn existing_account(&self, account_id: Uuid) -> Result<Account, DomainError> {
        self.accounts
            .find_by_id(account_id)
            .await?
            .ok_or(DomainError::AccountNotFound(account_id))
    }
}
