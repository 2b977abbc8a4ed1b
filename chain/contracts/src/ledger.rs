//! Ledger: the value-transfer capability the wallet holds balances on
//!
//! The wallet never keeps its own balance counters. Every balance it reports
//! or checks is a query against a [`Ledger`], the same ledger external parties
//! deposit through and the swap venue settles against.
//!
//! - [`Ledger`]: storage primitives (balances, allowances)
//! - [`LedgerExt`]: conventional fungible-asset semantics built on them
//! - [`InMemoryLedger`]: concrete world-state ledger
//! - [`LedgerTx`]: scratch overlay that buffers writes until `commit`

use std::collections::HashMap;

use tracing::trace;
use types::ids::{Address, Asset};
use types::numeric::Amount;

use crate::errors::LedgerError;

type BalanceKey = (Asset, Address);
/// (token, owner, spender)
type AllowanceKey = (Address, Address, Address);

/// Storage primitives of a fungible-asset ledger.
///
/// Implementors only store values; invariants such as "no negative balances"
/// and "transfers preserve supply" live in [`LedgerExt`].
pub trait Ledger {
    /// Balance of `holder` in `asset`. Unknown holders have zero.
    fn balance_of(&self, asset: &Asset, holder: &Address) -> Amount;

    /// Amount `spender` may still draw from `owner`'s `token` balance.
    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount;

    fn set_balance(&mut self, asset: &Asset, holder: &Address, amount: Amount);

    fn set_allowance(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    );
}

/// Transfer, approval and minting semantics over any [`Ledger`].
///
/// Every method validates before writing, so a failed call leaves the
/// ledger untouched.
pub trait LedgerExt: Ledger {
    /// Move `amount` of `asset` from `from` to `to`.
    fn transfer(
        &mut self,
        asset: &Asset,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let available = self.balance_of(asset, from);
        let debited = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                asset: asset.to_string(),
                required: amount,
                available,
            })?;

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(asset, from, debited);
        self.set_balance(asset, to, credited);
        Ok(())
    }

    /// Grant `spender` the right to draw up to `amount` of `token` from
    /// `owner`. Replaces any previous grant.
    fn approve(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.set_allowance(token, owner, spender, amount);
        Ok(())
    }

    /// Move `amount` of `token` from `from` to `to` on behalf of `spender`,
    /// consuming allowance.
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let approved = self.allowance(token, from, spender);
        let remaining = approved
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                token: *token,
                required: amount,
                approved,
            })?;

        self.transfer(&Asset::Token(*token), from, to, amount)?;
        self.set_allowance(token, from, spender, remaining);
        Ok(())
    }

    /// Create `amount` of `asset` in `to`'s balance.
    fn mint(&mut self, asset: &Asset, to: &Address, amount: Amount) -> Result<(), LedgerError> {
        let credited = self
            .balance_of(asset, to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_balance(asset, to, credited);
        Ok(())
    }

    /// Deposit `amount` of native currency into the `wrapped` token contract
    /// and credit `holder` with the same amount of the wrapped token.
    fn wrap_native(
        &mut self,
        wrapped: &Address,
        holder: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if wrapped.is_zero() {
            return Err(LedgerError::UnsupportedAsset {
                asset: Asset::Token(*wrapped).to_string(),
            });
        }

        let token = Asset::Token(*wrapped);
        self.balance_of(&token, holder)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.transfer(&Asset::Native, holder, wrapped, amount)?;
        self.mint(&token, holder, amount)
    }
}

impl<L: Ledger + ?Sized> LedgerExt for L {}

/// Hash-map backed ledger holding native and token balances for every
/// address.
///
/// Zero balances and allowances are not stored, so two ledgers describing the
/// same state compare equal.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryLedger {
    balances: HashMap<BalanceKey, Amount>,
    allowances: HashMap<AllowanceKey, Amount>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seeding of a balance.
    pub fn with_balance(mut self, asset: Asset, holder: Address, amount: Amount) -> Self {
        self.set_balance(&asset, &holder, amount);
        self
    }

    /// Sum of every holder's balance in `asset`.
    ///
    /// Returns `None` if the sum does not fit in an [`Amount`].
    pub fn total_supply(&self, asset: &Asset) -> Option<Amount> {
        self.balances
            .iter()
            .filter(|((a, _), _)| a == asset)
            .try_fold(Amount::ZERO, |acc, (_, amount)| acc.checked_add(*amount))
    }
}

impl Ledger for InMemoryLedger {
    fn balance_of(&self, asset: &Asset, holder: &Address) -> Amount {
        self.balances
            .get(&(*asset, *holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*token, *owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn set_balance(&mut self, asset: &Asset, holder: &Address, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(*asset, *holder));
        } else {
            self.balances.insert((*asset, *holder), amount);
        }
    }

    fn set_allowance(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) {
        if amount.is_zero() {
            self.allowances.remove(&(*token, *owner, *spender));
        } else {
            self.allowances.insert((*token, *owner, *spender), amount);
        }
    }
}

/// All-or-nothing scope over a durable ledger.
///
/// Reads see the transaction's own writes first and fall through to the
/// durable ledger otherwise. Writes stay in the scratch maps until
/// [`LedgerTx::commit`]; dropping the transaction discards them, so the
/// durable ledger is untouched by anything that happened inside it.
pub struct LedgerTx<'a> {
    base: &'a mut dyn Ledger,
    balances: HashMap<BalanceKey, Amount>,
    allowances: HashMap<AllowanceKey, Amount>,
}

impl<'a> LedgerTx<'a> {
    /// Open a transaction over `base`.
    pub fn begin(base: &'a mut dyn Ledger) -> Self {
        Self {
            base,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Number of buffered writes.
    pub fn pending_writes(&self) -> usize {
        self.balances.len() + self.allowances.len()
    }

    /// Apply every buffered write to the durable ledger.
    pub fn commit(self) {
        trace!(writes = self.pending_writes(), "Committing ledger transaction");
        let LedgerTx {
            base,
            balances,
            allowances,
        } = self;

        for ((asset, holder), amount) in balances {
            base.set_balance(&asset, &holder, amount);
        }
        for ((token, owner, spender), amount) in allowances {
            base.set_allowance(&token, &owner, &spender, amount);
        }
    }

    /// Discard every buffered write.
    pub fn rollback(self) {
        trace!(writes = self.pending_writes(), "Rolling back ledger transaction");
    }
}

impl Ledger for LedgerTx<'_> {
    fn balance_of(&self, asset: &Asset, holder: &Address) -> Amount {
        match self.balances.get(&(*asset, *holder)) {
            Some(amount) => *amount,
            None => self.base.balance_of(asset, holder),
        }
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        match self.allowances.get(&(*token, *owner, *spender)) {
            Some(amount) => *amount,
            None => self.base.allowance(token, owner, spender),
        }
    }

    fn set_balance(&mut self, asset: &Asset, holder: &Address, amount: Amount) {
        self.balances.insert((*asset, *holder), amount);
    }

    fn set_allowance(
        &mut self,
        token: &Address,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) {
        self.allowances.insert((*token, *owner, *spender), amount);
    }
}
