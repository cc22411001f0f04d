use std::sync::Arc;

use tracing::{error, info, warn};

use vendo_core::repository::CatalogRepository;

use crate::client::{ClientError, StorefrontClient};
use crate::format;
use crate::gemini::GeminiClient;
use crate::intent::{self, Intent};

const SYSTEM_PROMPT: &str = "\
Eres el asistente de ventas de una tienda en línea. Ayudas al cliente a \
encontrar productos y armar carritos de compra.

Cuando necesites datos de la tienda, responde con UNA sola línea JSON:
  {\"action\": \"list_products\"}
  {\"action\": \"search_products\", \"term\": \"<texto>\"}
  {\"action\": \"get_product\", \"id\": <numero>}
  {\"action\": \"create_cart\", \"items\": [{\"product_id\": <numero>, \"qty\": <numero>}]}

Si no hace falta ninguna acción, responde al cliente directamente en español, \
breve y amable, sin JSON.";

/// The conversational front-end. Constructed once at process start and
/// passed to handlers by reference; it keeps no state between messages.
pub struct SalesAgent {
    llm: Option<GeminiClient>,
    api: StorefrontClient,
    // Same store identity the HTTP layer serves from. Used only when the
    // storefront call fails in transport, and only through the list/get
    // contracts, so no stock or existence check is ever bypassed.
    catalog: Arc<dyn CatalogRepository>,
}

impl SalesAgent {
    pub fn new(
        llm: Option<GeminiClient>,
        api: StorefrontClient,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        Self { llm, api, catalog }
    }

    /// Handle one inbound message. Every message is independent; no
    /// conversation state survives between calls.
    pub async fn process_message(&self, message: &str, sender: &str) -> String {
        info!(sender, "processing inbound message");

        let Some(llm) = &self.llm else {
            return self.keyword_reply(message).await;
        };

        let prompt = format!("{}\n\nCliente: {}", SYSTEM_PROMPT, message);
        let reply = match llm.generate(&prompt).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, "model call failed, using keyword fallback");
                return self.keyword_reply(message).await;
            }
        };

        match intent::parse(&reply) {
            Intent::ListProducts => self.render_products(None).await,
            Intent::SearchProducts { term } => self.render_products(Some(&term)).await,
            Intent::GetProduct { id } => self.render_product(id).await,
            Intent::CreateCart { items } => match self.api.create_cart(&items).await {
                Ok(cart) => format::cart_created(&cart),
                Err(ClientError::Api { message, .. }) => format::rejection(&message),
                Err(ClientError::Transport(err)) => {
                    warn!(error = %err, "storefront unreachable for cart creation");
                    format::unavailable()
                }
            },
            Intent::Reply(text) => text,
        }
    }

    /// Deterministic reply path used when no model is configured or the
    /// model call failed.
    async fn keyword_reply(&self, message: &str) -> String {
        let msg = message.to_lowercase();

        if ["hola", "buenos", "hi"].iter().any(|w| msg.contains(w)) {
            format::greeting()
        } else if ["productos", "catalogo", "catálogo"]
            .iter()
            .any(|w| msg.contains(w))
        {
            self.render_products(None).await
        } else if msg.contains("busca") {
            let term = msg.replace("buscar", "").replace("busca", "");
            let term = term.trim();
            let filter = (!term.is_empty()).then_some(term);
            self.render_products(filter).await
        } else {
            format::help()
        }
    }

    async fn render_products(&self, filter: Option<&str>) -> String {
        match self.api.list_products(filter).await {
            Ok(products) => format::product_list(&products, filter),
            Err(ClientError::Api { message, .. }) => format::rejection(&message),
            Err(ClientError::Transport(err)) => {
                warn!(error = %err, "storefront unreachable, reading catalog directly");
                match self.catalog.list(filter).await {
                    Ok(products) => format::product_list(&products, filter),
                    Err(store_err) => {
                        error!(error = %store_err, "catalog fallback read failed");
                        format::unavailable()
                    }
                }
            }
        }
    }

    async fn render_product(&self, id: i64) -> String {
        match self.api.get_product(id).await {
            Ok(product) => format::product_detail(&product),
            Err(ClientError::Api { message, .. }) => format::rejection(&message),
            Err(ClientError::Transport(err)) => {
                warn!(error = %err, "storefront unreachable, reading catalog directly");
                match self.catalog.get(id).await {
                    Ok(Some(product)) => format::product_detail(&product),
                    Ok(None) => format::rejection(&format!("Product {} not found", id)),
                    Err(store_err) => {
                        error!(error = %store_err, "catalog fallback read failed");
                        format::unavailable()
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::time::Duration;
    use vendo_core::product::Product;

    struct FixedCatalog {
        products: Vec<Product>,
    }

    #[async_trait]
    impl CatalogRepository for FixedCatalog {
        async fn list(
            &self,
            filter: Option<&str>,
        ) -> Result<Vec<Product>, Box<dyn std::error::Error + Send + Sync>> {
            let filter = filter.map(str::to_lowercase);
            Ok(self
                .products
                .iter()
                .filter(|p| match &filter {
                    Some(q) => {
                        p.name.to_lowercase().contains(q)
                            || p.description.to_lowercase().contains(q)
                    }
                    None => true,
                })
                .cloned()
                .collect())
        }

        async fn get(
            &self,
            id: i64,
        ) -> Result<Option<Product>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(self.products.iter().find(|p| p.id == id).cloned())
        }
    }

    // Nothing listens on port 1, so every storefront call fails in
    // transport and exercises the fallback read path.
    fn agent_with(products: Vec<Product>) -> SalesAgent {
        let api = StorefrontClient::new(
            "http://127.0.0.1:1".to_string(),
            Duration::from_millis(250),
        )
        .unwrap();
        SalesAgent::new(None, api, Arc::new(FixedCatalog { products }))
    }

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            description: String::new(),
            price: 5.0,
            stock: 3,
        }
    }

    #[tokio::test]
    async fn test_greeting_without_model() {
        let agent = agent_with(vec![]);
        let reply = agent.process_message("hola", "user-1").await;
        assert!(reply.contains("asistente de ventas"));
    }

    #[tokio::test]
    async fn test_catalog_keyword_falls_back_to_store_reads() {
        let agent = agent_with(vec![product(1, "Camisa M Roja")]);
        let reply = agent.process_message("ver productos", "user-1").await;
        assert!(reply.contains("Camisa M Roja"));
    }

    #[tokio::test]
    async fn test_search_keyword_extracts_term() {
        let agent = agent_with(vec![product(1, "Camisa M Roja"), product(2, "Gorra Azul")]);
        let reply = agent.process_message("buscar gorra", "user-1").await;
        assert!(reply.contains("Gorra Azul"));
        assert!(!reply.contains("Camisa"));
    }

    #[tokio::test]
    async fn test_unrecognized_message_gets_help() {
        let agent = agent_with(vec![]);
        let reply = agent.process_message("qwerty", "user-1").await;
        assert!(reply.contains("catálogo"));
    }
}
