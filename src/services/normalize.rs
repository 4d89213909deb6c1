// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Projection of upstream items into the consumer-facing listing shape.

use crate::models::{Amount, Delivery, NormalizedListing, RawListing};
use crate::time_utils::date_portion;

const DEFAULT_TITLE: &str = "No title";

/// Normalize one upstream item. Total: missing fields fall back to defaults.
pub fn normalize(item: &RawListing) -> NormalizedListing {
    let delivery = item.shipping_options.first().map(|option| Delivery {
        cost: Amount::display(option.shipping_cost.as_ref()),
        min_date: option
            .min_estimated_delivery_date
            .as_deref()
            .and_then(date_portion),
        max_date: option
            .max_estimated_delivery_date
            .as_deref()
            .and_then(date_portion),
    });

    NormalizedListing {
        title: item
            .title
            .clone()
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        price: Amount::display(item.price.as_ref()),
        image: item.image.as_ref().and_then(|i| i.image_url.clone()),
        url: item.item_web_url.clone(),
        delivery,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Image, ShippingOption};

    #[test]
    fn missing_fields_use_defaults() {
        let listing = normalize(&RawListing::default());
        assert_eq!(listing.title, "No title");
        assert_eq!(listing.price, "Unknown");
        assert_eq!(listing.image, None);
        assert_eq!(listing.url, None);
        assert_eq!(listing.delivery, None);
    }

    #[test]
    fn full_item_is_formatted() {
        let item = RawListing {
            item_id: Some("v1|1|0".to_string()),
            item_creation_date: Some("2025-03-01T10:00:00.000Z".to_string()),
            title: Some("Vintage road bike".to_string()),
            price: Some(Amount {
                value: Some("120.00".to_string()),
                currency: Some("GBP".to_string()),
            }),
            image: Some(Image {
                image_url: Some("https://i.ebayimg.com/1.jpg".to_string()),
            }),
            item_web_url: Some("https://www.ebay.co.uk/itm/1".to_string()),
            shipping_options: vec![
                ShippingOption {
                    shipping_cost: Some(Amount {
                        value: Some("4.99".to_string()),
                        currency: Some("GBP".to_string()),
                    }),
                    min_estimated_delivery_date: Some("2025-03-04T07:00:00.000Z".to_string()),
                    max_estimated_delivery_date: Some("2025-03-06T07:00:00.000Z".to_string()),
                },
                ShippingOption::default(),
            ],
        };

        let listing = normalize(&item);
        assert_eq!(listing.title, "Vintage road bike");
        assert_eq!(listing.price, "GBP 120.00");
        assert_eq!(listing.image.as_deref(), Some("https://i.ebayimg.com/1.jpg"));
        assert_eq!(listing.url.as_deref(), Some("https://www.ebay.co.uk/itm/1"));
        assert_eq!(
            listing.delivery,
            Some(Delivery {
                cost: "GBP 4.99".to_string(),
                min_date: Some("2025-03-04".to_string()),
                max_date: Some("2025-03-06".to_string()),
            })
        );
    }

    #[test]
    fn partial_amount_is_trimmed() {
        let item = RawListing {
            price: Some(Amount {
                value: Some("15.00".to_string()),
                currency: None,
            }),
            ..Default::default()
        };
        assert_eq!(normalize(&item).price, "15.00");
    }

    #[test]
    fn empty_shipping_option_keeps_unknown_cost() {
        let item = RawListing {
            shipping_options: vec![ShippingOption::default()],
            ..Default::default()
        };
        assert_eq!(
            normalize(&item).delivery,
            Some(Delivery {
                cost: "Unknown".to_string(),
                min_date: None,
                max_date: None,
            })
        );
    }
}
