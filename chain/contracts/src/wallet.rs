//! Smart wallet: roles, withdrawal whitelist, custody and swap execution
//!
//! A custodial account holding native currency and tokens for its owner:
//! - Owner-gated role management (ownership transfer, trader assignment)
//! - Owner-gated withdrawal whitelist
//! - Unconditional deposits; owner/trader withdrawals to whitelisted
//!   destinations only
//! - Owner/trader swaps through a fixed venue with a minimum-output floor
//!
//! Balances live on the [`Ledger`] passed into each call. Every mutating
//! operation runs inside one [`LedgerTx`] and commits only once all of its
//! checks have passed; on any error the ledger and the wallet are exactly as
//! they were before the call.

use tracing::{debug, info, warn};
use types::ids::{Address, Asset};
use types::numeric::Amount;
use uuid::Uuid;

use crate::config::WalletConfig;
use crate::errors::{VenueError, WalletError};
use crate::events::{
    ContractEvent, Deposited, OwnershipTransferred, SwapExecuted, TraderUpdated,
    WithdrawalAddressAdded, WithdrawalAddressRemoved, Withdrawn,
};
use crate::ledger::{Ledger, LedgerExt, LedgerTx};
use crate::security::{RoleRegistry, WithdrawalWhitelist};
use crate::venue::{SwapVenue, VenueCall};

/// Parameters of a single swap. Never stored by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub input_token: Address,
    pub output_token: Address,
    /// Exact allowance granted to the venue for this call
    pub amount_in: Amount,
    /// Slippage floor; zero disables the check
    pub min_amount_out: Amount,
    /// Opaque venue instruction, forwarded verbatim
    pub payload: Vec<u8>,
}

/// Outcome of a committed swap, as measured on the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub swap_id: Uuid,
    pub amount_in: Amount,
    pub amount_out: Amount,
}

/// Role-gated custodial account.
#[derive(Debug)]
pub struct SmartWallet<V: SwapVenue> {
    /// The wallet's own identity on the ledger
    address: Address,
    roles: RoleRegistry,
    whitelist: WithdrawalWhitelist,
    wrapped_native: Option<Address>,
    venue: V,
    /// Emitted events log (append-only)
    events: Vec<ContractEvent>,
}

impl<V: SwapVenue> SmartWallet<V> {
    /// Create a wallet deployed by `deployer`.
    ///
    /// The wallet address is derived from `(deployer, nonce)`. Owner and
    /// trader come from `config`, falling back to the deployer. The venue is
    /// fixed for the lifetime of the wallet.
    pub fn deploy(deployer: Address, nonce: u64, config: &WalletConfig, venue: V) -> Self {
        let address = Address::derive(&deployer, nonce);
        let owner = config.resolve_owner(deployer);
        let trader = config.resolve_trader(deployer);

        info!(
            wallet = %address,
            %owner,
            %trader,
            venue = %venue.address(),
            "Smart wallet deployed"
        );

        Self {
            address,
            roles: RoleRegistry::new(owner, trader),
            whitelist: WithdrawalWhitelist::new(),
            wrapped_native: config.wrapped_native,
            venue,
            events: Vec::new(),
        }
    }

    // ───────────────────────── Roles ─────────────────────────

    /// Hand ownership to `new_owner`. Owner-only.
    pub fn transfer_ownership(
        &mut self,
        caller: &Address,
        new_owner: Address,
    ) -> Result<ContractEvent, WalletError> {
        let previous_owner = self.roles.owner();
        if !self.roles.transfer_ownership(caller, new_owner) {
            return Err(self.unauthorized(caller, "transfer_ownership"));
        }

        info!(wallet = %self.address, %previous_owner, %new_owner, "Ownership transferred");
        Ok(self.emit(ContractEvent::OwnershipTransferred(OwnershipTransferred {
            previous_owner,
            new_owner,
        })))
    }

    /// Replace the trader. Owner-only.
    pub fn set_trader(
        &mut self,
        caller: &Address,
        new_trader: Address,
    ) -> Result<ContractEvent, WalletError> {
        let previous_trader = self.roles.trader();
        if !self.roles.set_trader(caller, new_trader) {
            return Err(self.unauthorized(caller, "set_trader"));
        }

        info!(wallet = %self.address, %previous_trader, %new_trader, "Trader updated");
        Ok(self.emit(ContractEvent::TraderUpdated(TraderUpdated {
            previous_trader,
            new_trader,
        })))
    }

    pub fn is_owner(&self, identity: &Address) -> bool {
        self.roles.is_owner(identity)
    }

    pub fn is_trader(&self, identity: &Address) -> bool {
        self.roles.is_trader(identity)
    }

    pub fn owner(&self) -> Address {
        self.roles.owner()
    }

    pub fn trader(&self) -> Address {
        self.roles.trader()
    }

    // ───────────────────────── Withdrawal Whitelist ─────────────────────────

    /// Approve `destination` for withdrawals. Owner-only; adding a present
    /// entry succeeds without effect.
    pub fn add_withdrawal_address(
        &mut self,
        caller: &Address,
        destination: Address,
    ) -> Result<(), WalletError> {
        self.require_owner(caller, "add_withdrawal_address")?;

        if self.whitelist.insert(destination) {
            info!(wallet = %self.address, %destination, "Withdrawal address added");
            self.emit(ContractEvent::WithdrawalAddressAdded(WithdrawalAddressAdded {
                destination,
            }));
        }
        Ok(())
    }

    /// Revoke `destination`. Owner-only; removing an absent entry succeeds
    /// without effect.
    pub fn remove_withdrawal_address(
        &mut self,
        caller: &Address,
        destination: &Address,
    ) -> Result<(), WalletError> {
        self.require_owner(caller, "remove_withdrawal_address")?;

        if self.whitelist.remove(destination) {
            info!(wallet = %self.address, %destination, "Withdrawal address removed");
            self.emit(ContractEvent::WithdrawalAddressRemoved(
                WithdrawalAddressRemoved {
                    destination: *destination,
                },
            ));
        }
        Ok(())
    }

    pub fn is_whitelisted(&self, destination: &Address) -> bool {
        self.whitelist.contains(destination)
    }

    /// Whitelisted destinations in ascending order.
    pub fn whitelisted_addresses(&self) -> Vec<Address> {
        self.whitelist.sorted()
    }

    // ───────────────────────── Deposits ─────────────────────────

    /// Receive native currency from `from`. Anyone may deposit.
    pub fn deposit_eth(
        &mut self,
        ledger: &mut dyn Ledger,
        from: &Address,
        amount: Amount,
    ) -> Result<ContractEvent, WalletError> {
        self.deposit(ledger, Asset::Native, from, amount)
    }

    /// Receive `token` from `from`. Anyone may deposit.
    pub fn deposit_tokens(
        &mut self,
        ledger: &mut dyn Ledger,
        token: &Address,
        from: &Address,
        amount: Amount,
    ) -> Result<ContractEvent, WalletError> {
        self.deposit(ledger, Asset::Token(*token), from, amount)
    }

    fn deposit(
        &mut self,
        ledger: &mut dyn Ledger,
        asset: Asset,
        from: &Address,
        amount: Amount,
    ) -> Result<ContractEvent, WalletError> {
        let mut tx = LedgerTx::begin(ledger);
        tx.transfer(&asset, from, &self.address, amount)?;
        tx.commit();

        debug!(wallet = %self.address, %from, %asset, %amount, "Deposit received");
        Ok(self.emit(ContractEvent::Deposited(Deposited {
            from: *from,
            asset,
            amount,
        })))
    }

    // ───────────────────────── Balance Queries ─────────────────────────

    pub fn balance(&self, ledger: &dyn Ledger, asset: &Asset) -> Amount {
        ledger.balance_of(asset, &self.address)
    }

    pub fn eth_balance(&self, ledger: &dyn Ledger) -> Amount {
        self.balance(ledger, &Asset::Native)
    }

    pub fn token_balance(&self, ledger: &dyn Ledger, token: &Address) -> Amount {
        self.balance(ledger, &Asset::Token(*token))
    }

    // ───────────────────────── Withdrawals ─────────────────────────

    /// Send native currency to a whitelisted destination. Owner or trader.
    pub fn withdraw_eth(
        &mut self,
        ledger: &mut dyn Ledger,
        caller: &Address,
        amount: Amount,
        destination: &Address,
    ) -> Result<ContractEvent, WalletError> {
        self.withdraw(ledger, caller, Asset::Native, amount, destination)
    }

    /// Send `token` to a whitelisted destination. Owner or trader.
    pub fn withdraw_tokens(
        &mut self,
        ledger: &mut dyn Ledger,
        caller: &Address,
        token: &Address,
        amount: Amount,
        destination: &Address,
    ) -> Result<ContractEvent, WalletError> {
        self.withdraw(ledger, caller, Asset::Token(*token), amount, destination)
    }

    /// Checks run whitelist first, then role, then balance.
    fn withdraw(
        &mut self,
        ledger: &mut dyn Ledger,
        caller: &Address,
        asset: Asset,
        amount: Amount,
        destination: &Address,
    ) -> Result<ContractEvent, WalletError> {
        if !self.whitelist.contains(destination) {
            warn!(
                wallet = %self.address,
                %caller,
                %destination,
                "Withdrawal to non-whitelisted destination"
            );
            return Err(WalletError::DestinationNotWhitelisted {
                destination: *destination,
            });
        }
        self.require_operator(caller, "withdraw")?;

        let mut tx = LedgerTx::begin(ledger);
        Self::require_balance(&tx, &self.address, &asset, amount)?;
        tx.transfer(&asset, &self.address, destination, amount)?;
        tx.commit();

        let withdrawal_id = Uuid::now_v7();
        info!(
            wallet = %self.address,
            %withdrawal_id,
            %caller,
            %asset,
            %amount,
            %destination,
            "Withdrawal completed"
        );
        Ok(self.emit(ContractEvent::Withdrawn(Withdrawn {
            withdrawal_id,
            caller: *caller,
            asset,
            amount,
            destination: *destination,
        })))
    }

    // ───────────────────────── Swaps ─────────────────────────

    /// Exchange `amount_in` of the input token through the venue, requiring
    /// the output balance to grow by at least `min_amount_out`.
    ///
    /// Protocol, all inside one ledger transaction:
    /// 1. wrap the native balance if the input is the wrapped-native token
    ///    and `amount_in` is non-zero
    /// 2. check the input balance covers `amount_in`
    /// 3. record the output balance
    /// 4. approve the venue for exactly `amount_in`
    /// 5. forward the payload to the venue
    /// 6. measure the output increase against the floor and the input
    ///    debit against `amount_in`
    /// 7. restore the venue's allowance and commit
    ///
    /// A failure at any step discards every ledger write of the call,
    /// including whatever the venue did before failing.
    pub fn swap(
        &mut self,
        ledger: &mut dyn Ledger,
        caller: &Address,
        request: &SwapRequest,
    ) -> Result<SwapReceipt, WalletError> {
        self.require_operator(caller, "swap")?;
        if request.input_token == request.output_token {
            warn!(
                wallet = %self.address,
                token = %request.input_token,
                "Swap between identical tokens rejected"
            );
            return Err(WalletError::IdenticalTokens {
                token: request.input_token,
            });
        }

        let wallet = self.address;
        let venue_address = self.venue.address();
        let input = Asset::Token(request.input_token);
        let output = Asset::Token(request.output_token);

        let mut tx = LedgerTx::begin(ledger);

        if !request.amount_in.is_zero() && self.wrapped_native == Some(request.input_token) {
            let native = tx.balance_of(&Asset::Native, &wallet);
            if !native.is_zero() {
                tx.wrap_native(&request.input_token, &wallet, native)?;
                debug!(wallet = %wallet, amount = %native, "Wrapped native balance for swap");
            }
        }

        Self::require_balance(&tx, &wallet, &input, request.amount_in)?;

        let input_before = tx.balance_of(&input, &wallet);
        let output_before = tx.balance_of(&output, &wallet);
        let prior_allowance = tx.allowance(&request.input_token, &wallet, &venue_address);

        tx.approve(&request.input_token, &wallet, &venue_address, request.amount_in)?;

        let call = VenueCall {
            sender: wallet,
            payload: &request.payload,
        };
        if let Err(err) = self.venue.execute(&mut tx, &call) {
            warn!(wallet = %wallet, venue = %venue_address, error = %err, "Venue call failed");
            return Err(WalletError::VenueCallFailed(err));
        }

        let output_after = tx.balance_of(&output, &wallet);
        let received = output_after.saturating_sub(output_before);
        debug!(
            wallet = %wallet,
            before = %output_before,
            after = %output_after,
            received = %received,
            "Measured swap output"
        );

        if received < request.min_amount_out {
            warn!(
                wallet = %wallet,
                %received,
                minimum = %request.min_amount_out,
                "Swap output below minimum"
            );
            return Err(WalletError::SlippageExceeded {
                received,
                minimum: request.min_amount_out,
            });
        }

        let spent = input_before.saturating_sub(tx.balance_of(&input, &wallet));
        if spent > request.amount_in {
            warn!(
                wallet = %wallet,
                venue = %venue_address,
                approved = %request.amount_in,
                debited = %spent,
                "Venue debited more than approved"
            );
            return Err(WalletError::VenueCallFailed(VenueError::Overdrawn {
                token: request.input_token,
                approved: request.amount_in,
                debited: spent,
            }));
        }

        tx.approve(&request.input_token, &wallet, &venue_address, prior_allowance)?;
        tx.commit();

        let swap_id = Uuid::now_v7();
        info!(
            wallet = %wallet,
            %swap_id,
            %caller,
            input_token = %request.input_token,
            output_token = %request.output_token,
            amount_in = %spent,
            amount_out = %received,
            "Swap executed"
        );
        self.emit(ContractEvent::SwapExecuted(SwapExecuted {
            swap_id,
            caller: *caller,
            venue: venue_address,
            input_token: request.input_token,
            output_token: request.output_token,
            amount_in: spent,
            amount_out: received,
            min_amount_out: request.min_amount_out,
        }));

        Ok(SwapReceipt {
            swap_id,
            amount_in: spent,
            amount_out: received,
        })
    }

    // ───────────────────────── Accessors ─────────────────────────

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    pub fn venue_address(&self) -> Address {
        self.venue.address()
    }

    pub fn wrapped_native(&self) -> Option<Address> {
        self.wrapped_native
    }

    // ───────────────────────── Events ─────────────────────────

    /// Get all emitted events.
    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    /// Drain all events (consume and clear).
    pub fn drain_events(&mut self) -> Vec<ContractEvent> {
        std::mem::take(&mut self.events)
    }

    // ───────────────────────── Internal Guards ─────────────────────────

    fn emit(&mut self, event: ContractEvent) -> ContractEvent {
        self.events.push(event.clone());
        event
    }

    fn unauthorized(&self, caller: &Address, action: &'static str) -> WalletError {
        warn!(wallet = %self.address, %caller, action, "Unauthorized call rejected");
        WalletError::Unauthorized
    }

    fn require_owner(&self, caller: &Address, action: &'static str) -> Result<(), WalletError> {
        if !self.roles.is_owner(caller) {
            return Err(self.unauthorized(caller, action));
        }
        Ok(())
    }

    fn require_operator(&self, caller: &Address, action: &'static str) -> Result<(), WalletError> {
        if !self.roles.is_operator(caller) {
            return Err(self.unauthorized(caller, action));
        }
        Ok(())
    }

    fn require_balance(
        ledger: &dyn Ledger,
        holder: &Address,
        asset: &Asset,
        required: Amount,
    ) -> Result<(), WalletError> {
        let available = ledger.balance_of(asset, holder);
        if available < required {
            return Err(WalletError::InsufficientBalance {
                asset: asset.to_string(),
                required,
                available,
            });
        }
        Ok(())
    }
}
