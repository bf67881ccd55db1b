//! Field-access policy for the product edit workflow.
//!
//! Resolved once at request entry, before any validation: the owner edits the
//! full field set; an actor holding ALL three product capabilities edits the
//! moderator subset (description and category); everyone else is rejected.

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::products::dtos::ProductFormDto;
use crate::features::products::models::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPolicy {
    /// The product's owner: every field is editable.
    Owner,
    /// Full-capability moderator: description and category only.
    Moderator,
}

impl EditPolicy {
    /// Ownership wins; the capability check is all-or-nothing.
    pub fn resolve(actor: &AuthenticatedUser, product: &Product) -> Result<Self> {
        if product.owner_id == actor.id {
            return Ok(EditPolicy::Owner);
        }

        if actor.can_moderate_products() {
            return Ok(EditPolicy::Moderator);
        }

        Err(AppError::Forbidden(
            "You do not have permission to edit this product".to_string(),
        ))
    }

    /// Clamp a submitted field set to what this policy may change. Values
    /// outside the allowed subset are replaced with the stored ones.
    pub fn restrict(&self, submitted: ProductFormDto, current: &Product) -> ProductFormDto {
        match self {
            EditPolicy::Owner => submitted,
            EditPolicy::Moderator => ProductFormDto {
                name: current.name.clone(),
                description: submitted.description,
                category_id: submitted.category_id,
                price: current.price,
                manufactured_at: current.manufactured_at,
            },
        }
    }

    /// Only the owner may replace the photo.
    pub fn allows_photo(&self) -> bool {
        matches!(self, EditPolicy::Owner)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EditPolicy::Owner => "owner",
            EditPolicy::Moderator => "moderator",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{create_moderator, create_partial_moderator, create_user};
    use chrono::NaiveDate;

    fn product_owned_by(owner_id: i64) -> Product {
        Product {
            id: 1,
            name: "Hammer".to_string(),
            description: Some("Steel head".to_string()),
            photo: None,
            category_id: Some(3),
            price: Some(10),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            owner_id,
            manufactured_at: None,
        }
    }

    #[test]
    fn test_owner_resolves_to_owner_policy() {
        let actor = create_user(7);
        let product = product_owned_by(7);
        assert_eq!(
            EditPolicy::resolve(&actor, &product).unwrap(),
            EditPolicy::Owner
        );
    }

    #[test]
    fn test_full_capability_set_resolves_to_moderator() {
        let actor = create_moderator(8);
        let product = product_owned_by(7);
        assert_eq!(
            EditPolicy::resolve(&actor, &product).unwrap(),
            EditPolicy::Moderator
        );
    }

    #[test]
    fn test_partial_capability_set_is_forbidden() {
        let actor = create_partial_moderator(8);
        let product = product_owned_by(7);
        assert!(matches!(
            EditPolicy::resolve(&actor, &product),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_stranger_is_forbidden() {
        let actor = create_user(8);
        let product = product_owned_by(7);
        assert!(matches!(
            EditPolicy::resolve(&actor, &product),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_moderator_restriction_keeps_stored_fields() {
        let product = product_owned_by(7);
        let submitted = ProductFormDto {
            name: "Renamed".to_string(),
            description: Some("Moderated description".to_string()),
            category_id: None,
            price: Some(999),
            manufactured_at: NaiveDate::from_ymd_opt(2025, 1, 1),
        };

        let effective = EditPolicy::Moderator.restrict(submitted, &product);

        assert_eq!(effective.name, "Hammer");
        assert_eq!(effective.price, Some(10));
        assert_eq!(effective.manufactured_at, None);
        assert_eq!(
            effective.description.as_deref(),
            Some("Moderated description")
        );
        assert_eq!(effective.category_id, None);
    }

    #[test]
    fn test_owner_restriction_passes_everything_through() {
        let product = product_owned_by(7);
        let submitted = ProductFormDto {
            name: "Renamed".to_string(),
            ..ProductFormDto::default()
        };
        let effective = EditPolicy::Owner.restrict(submitted.clone(), &product);
        assert_eq!(effective.name, submitted.name);
    }
}
