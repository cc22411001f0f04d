use serde::Deserialize;

use vendo_core::cart::CartItem;

/// Closed set of actions the model may request against the storefront.
///
/// Whatever the model answers is decoded strictly; any reply without a
/// well-formed directive is plain conversation and lands in `Reply`.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    ListProducts,
    SearchProducts { term: String },
    GetProduct { id: i64 },
    CreateCart { items: Vec<CartItem> },
    Reply(String),
}

// Wire shape of a directive line, e.g.
// {"action": "search_products", "term": "camisa"}
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum Directive {
    ListProducts,
    SearchProducts { term: String },
    GetProduct { id: i64 },
    CreateCart { items: Vec<CartItem> },
}

impl From<Directive> for Intent {
    fn from(directive: Directive) -> Self {
        match directive {
            Directive::ListProducts => Intent::ListProducts,
            Directive::SearchProducts { term } => Intent::SearchProducts { term },
            Directive::GetProduct { id } => Intent::GetProduct { id },
            Directive::CreateCart { items } => Intent::CreateCart { items },
        }
    }
}

/// Decode a model reply. The model is instructed to answer with a single
/// JSON directive line when it wants an action; the first line that decodes
/// wins. Everything else is a conversational reply.
pub fn parse(reply: &str) -> Intent {
    reply
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('{'))
        .find_map(|line| serde_json::from_str::<Directive>(line).ok())
        .map(Intent::from)
        .unwrap_or_else(|| Intent::Reply(reply.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_list_products() {
        assert_eq!(parse(r#"{"action": "list_products"}"#), Intent::ListProducts);
    }

    #[test]
    fn test_decodes_search_with_term() {
        assert_eq!(
            parse(r#"{"action": "search_products", "term": "camisa roja"}"#),
            Intent::SearchProducts {
                term: "camisa roja".to_string()
            }
        );
    }

    #[test]
    fn test_decodes_get_product() {
        assert_eq!(
            parse(r#"{"action": "get_product", "id": 42}"#),
            Intent::GetProduct { id: 42 }
        );
    }

    #[test]
    fn test_decodes_create_cart_items_in_order() {
        let intent = parse(
            r#"{"action": "create_cart", "items": [{"product_id": 2, "qty": 1}, {"product_id": 1, "qty": 3}]}"#,
        );
        match intent {
            Intent::CreateCart { items } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[0].product_id, 2);
                assert_eq!(items[1].qty, 3);
            }
            other => panic!("expected CreateCart, got {other:?}"),
        }
    }

    #[test]
    fn test_directive_embedded_in_prose_is_found() {
        let reply = "Claro, te muestro el catálogo.\n{\"action\": \"list_products\"}\nUn momento.";
        assert_eq!(parse(reply), Intent::ListProducts);
    }

    #[test]
    fn test_plain_text_is_a_reply() {
        let reply = "¡Hola! ¿En qué puedo ayudarte hoy?";
        assert_eq!(parse(reply), Intent::Reply(reply.to_string()));
    }

    #[test]
    fn test_unknown_action_falls_back_to_reply() {
        let reply = r#"{"action": "delete_everything"}"#;
        assert_eq!(parse(reply), Intent::Reply(reply.to_string()));
    }

    #[test]
    fn test_malformed_json_falls_back_to_reply() {
        let reply = r#"{"action": "get_product", "id": }"#;
        assert_eq!(parse(reply), Intent::Reply(reply.to_string()));
    }

    #[test]
    fn test_missing_required_field_falls_back_to_reply() {
        let reply = r#"{"action": "search_products"}"#;
        assert_eq!(parse(reply), Intent::Reply(reply.to_string()));
    }
}
