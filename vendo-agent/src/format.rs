//! Plain-text rendering for the chat channel. Bold markers (`*...*`) follow
//! WhatsApp formatting.

use vendo_core::cart::Cart;
use vendo_core::product::Product;

const LIST_LIMIT: usize = 10;

pub fn product_list(products: &[Product], filter: Option<&str>) -> String {
    if products.is_empty() {
        return "No se encontraron productos".to_string();
    }

    let mut out = match filter {
        Some(q) => format!("*Resultados para \"{}\"*\n\n", q),
        None => "*Productos disponibles*\n\n".to_string(),
    };

    for product in products.iter().take(LIST_LIMIT) {
        out.push_str(&format!(
            "- *{}*\n  ${:.2} | stock: {} | id: {}\n",
            product.name, product.price, product.stock, product.id
        ));
    }

    if products.len() > LIST_LIMIT {
        out.push_str(&format!(
            "... y {} productos más\n",
            products.len() - LIST_LIMIT
        ));
    }

    out.trim_end().to_string()
}

pub fn product_detail(product: &Product) -> String {
    format!(
        "*{}*\n{}\n${:.2} | stock: {} | id: {}",
        product.name, product.description, product.price, product.stock, product.id
    )
}

pub fn cart_created(cart: &Cart) -> String {
    render_cart("*Carrito creado*", cart)
}

pub fn cart_updated(cart: &Cart) -> String {
    render_cart("*Carrito actualizado*", cart)
}

fn render_cart(title: &str, cart: &Cart) -> String {
    let mut out = format!("{} (id: {})\n\n", title, cart.id);

    if cart.items.is_empty() {
        out.push_str("Carrito vacío\n");
    } else {
        for line in &cart.items {
            out.push_str(&format!(
                "- {} x {} @ ${:.2} = ${:.2}\n",
                line.qty,
                line.name,
                line.price,
                line.subtotal()
            ));
        }
    }

    out.push_str(&format!(
        "\nTotal items: {}\n*Total: ${:.2}*",
        cart.total_items, cart.total_amount
    ));
    out
}

pub fn rejection(message: &str) -> String {
    format!("No se pudo completar la operación: {}", message)
}

pub fn unavailable() -> String {
    "Lo siento, hubo un error. Intenta de nuevo.".to_string()
}

pub fn greeting() -> String {
    "¡Hola! Soy el asistente de ventas.\n\nPuedo ayudarte a:\n- Ver productos\n- Buscar productos\n- Crear carritos de compra\n\n¿Qué te interesa?".to_string()
}

pub fn help() -> String {
    "Puedo ayudarte con:\n- \"productos\" para ver el catálogo\n- \"buscar <término>\" para buscar\n- \"quiero comprar...\" para armar un carrito".to_string()
}
