//! Field names of the upstream order schema.
//!
//! The upstream export is XML-derived JSON; these keys are fixed by that
//! format and must not be renamed.

/// Container holding the embedded gift certificate line items.
pub const GIFT_CERTIFICATE_LINEITEMS: &str = "giftcertificate-lineitems";

/// Single-or-sequence field inside [`GIFT_CERTIFICATE_LINEITEMS`].
pub const GIFT_CERTIFICATE_LINEITEM: &str = "giftcertificate-lineitem";

/// Container holding the payments applied to the order.
pub const PAYMENTS: &str = "payments";

/// Single-or-sequence field inside [`PAYMENTS`].
pub const PAYMENT: &str = "payment";

/// Fractional tax rate of a certificate line item (0.05 = 5%).
pub const TAX: &str = "tax";

/// Base price of a certificate line item.
pub const BASE_PRICE: &str = "base-price";

/// Amount of a payment entry.
pub const AMOUNT: &str = "amount";

/// Marker present on payments funded by a gift certificate.
pub const GIFT_CERTIFICATE: &str = "gift-certificate";

/// Accumulator of synthesized product lines on the order document.
pub const NEW_PRODUCT_LINES: &str = "newProductLines";
