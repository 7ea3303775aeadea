use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use portfolio_commands::Command;
use portfolio_core::{ChargeDefinitionId, DomainError, DomainResult, Entity, ProductId};

/// Upper bound for `amount` (inclusive).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_316_134_911, 2_328, 0, false, 4);

const MAX_NAME_LEN: usize = 256;
const MAX_DESCRIPTION_LEN: usize = 2048;

/// How the charge amount is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeMethod {
    Fixed,
    Proportional,
    Interest,
}

/// Cycle unit a charge is expressed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CycleSizeUnit {
    Days,
    Weeks,
    Months,
    Years,
}

/// A named fee/charge rule attached to a product.
///
/// Only `identifier` and `read_only` mean anything to the lifecycle manager.
/// The remaining fields are carried through untouched and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeDefinition {
    pub identifier: ChargeDefinitionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrue_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge_method: Option<ChargeMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proportional_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_account_designator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accrual_account_designator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_account_designator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub for_cycle_size_unit: Option<CycleSizeUnit>,
    /// System-defined definitions are read-only and cannot be changed or deleted.
    #[serde(default)]
    pub read_only: bool,
}

impl ChargeDefinition {
    /// A mutable, fixed-amount charge with placeholder accounting designators.
    pub fn fixed(
        identifier: ChargeDefinitionId,
        name: impl Into<String>,
        charge_action: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            name: Some(name.into()),
            charge_action: Some(charge_action.into()),
            amount: Some(amount),
            charge_method: Some(ChargeMethod::Fixed),
            from_account_designator: Some("customer-loan".to_string()),
            to_account_designator: Some("fee-income".to_string()),
            ..Self::bare(identifier)
        }
    }

    /// Only an identifier; every descriptive field absent, not read-only.
    pub fn bare(identifier: ChargeDefinitionId) -> Self {
        Self {
            identifier,
            name: None,
            description: None,
            accrue_action: None,
            charge_action: None,
            amount: None,
            charge_method: None,
            proportional_to: None,
            from_account_designator: None,
            accrual_account_designator: None,
            to_account_designator: None,
            for_cycle_size_unit: None,
            read_only: false,
        }
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Structural checks applied to whatever fields are present, before the
    /// lifecycle rules run. Says nothing about uniqueness or mutability.
    pub fn validate_structure(&self) -> DomainResult<()> {
        self.identifier.validate()?;

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name must not be blank"));
            }
            if name.chars().count() > MAX_NAME_LEN {
                return Err(DomainError::validation(format!(
                    "name must be at most {MAX_NAME_LEN} characters"
                )));
            }
        }
        if self
            .description
            .as_ref()
            .is_some_and(|d| d.chars().count() > MAX_DESCRIPTION_LEN)
        {
            return Err(DomainError::validation(format!(
                "description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }
        if self
            .charge_action
            .as_ref()
            .is_some_and(|a| a.trim().is_empty())
        {
            return Err(DomainError::validation("chargeAction must not be blank"));
        }
        if let Some(amount) = self.amount {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(DomainError::validation("amount must not be negative"));
            }
            if amount > MAX_AMOUNT {
                return Err(DomainError::validation(format!(
                    "amount must not exceed {MAX_AMOUNT}"
                )));
            }
        }

        let designators = [
            ("fromAccountDesignator", &self.from_account_designator),
            ("toAccountDesignator", &self.to_account_designator),
            ("accrualAccountDesignator", &self.accrual_account_designator),
        ];
        for (field, value) in designators {
            if let Some(value) = value {
                check_designator(field, value)?;
            }
        }
        Ok(())
    }
}

fn check_designator(field: &str, value: &str) -> DomainResult<()> {
    ChargeDefinitionId::parse(value)
        .map(|_| ())
        .map_err(|_| DomainError::validation(format!("{field} is not a valid identifier")))
}

impl Entity for ChargeDefinition {
    type Id = ChargeDefinitionId;

    fn id(&self) -> &Self::Id {
        &self.identifier
    }
}

/// Command: CreateChargeDefinition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChargeDefinition {
    pub product_id: ProductId,
    pub definition: ChargeDefinition,
}

/// Command: ChangeChargeDefinition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeChargeDefinition {
    pub product_id: ProductId,
    pub definition: ChargeDefinition,
}

/// Command: DeleteChargeDefinition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteChargeDefinition {
    pub product_id: ProductId,
    pub charge_definition_id: ChargeDefinitionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeDefinitionCommand {
    Create(CreateChargeDefinition),
    Change(ChangeChargeDefinition),
    Delete(DeleteChargeDefinition),
}

impl ChargeDefinitionCommand {
    /// Identifier of the charge definition the command touches.
    pub fn charge_definition_id(&self) -> &ChargeDefinitionId {
        match self {
            ChargeDefinitionCommand::Create(cmd) => &cmd.definition.identifier,
            ChargeDefinitionCommand::Change(cmd) => &cmd.definition.identifier,
            ChargeDefinitionCommand::Delete(cmd) => &cmd.charge_definition_id,
        }
    }
}

impl Command for ChargeDefinitionCommand {
    fn command_type(&self) -> &'static str {
        match self {
            ChargeDefinitionCommand::Create(_) => "charges.definition.create",
            ChargeDefinitionCommand::Change(_) => "charges.definition.change",
            ChargeDefinitionCommand::Delete(_) => "charges.definition.delete",
        }
    }

    fn target_product(&self) -> &ProductId {
        match self {
            ChargeDefinitionCommand::Create(cmd) => &cmd.product_id,
            ChargeDefinitionCommand::Change(cmd) => &cmd.product_id,
            ChargeDefinitionCommand::Delete(cmd) => &cmd.product_id,
        }
    }
}
