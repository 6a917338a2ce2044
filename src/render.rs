use std::fmt::Write as _;

use crate::view::{
    BlockPageModel, ErrorModel, InputRow, LandingPageModel, OutputRow, Page, TxPageModel,
};

/// Turns a page model into a complete document.
pub trait Render: Send + Sync {
    fn render(&self, title: &str, page: &Page) -> String;
}

/// Plain HTML renderer with a shared header and footer.
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer;

impl Render for HtmlRenderer {
    fn render(&self, title: &str, page: &Page) -> String {
        let mut out = String::with_capacity(4096);
        header(&mut out, title);
        match page {
            Page::Landing(model) => landing(&mut out, model),
            Page::Block(model) => block(&mut out, model),
            Page::Tx(model) => tx(&mut out, model),
            Page::Error(model) => error(&mut out, model),
        }
        footer(&mut out);
        out
    }
}

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// Writing into a String cannot fail, so the fmt::Results below are discarded.

fn header(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         <link rel=\"stylesheet\" href=\"/css/blocksafari.css\">\n\
         <script src=\"/js/blocksafari.js\"></script>\n\
         </head>\n<body>\n\
         <div class=\"nav\"><a href=\"/\">blocksafari</a>\
         <form action=\"/search\" method=\"get\">\
         <input type=\"text\" name=\"q\" placeholder=\"block hash or height\">\
         </form></div>\n\
         <h1>{}</h1>\n",
        escape(title),
        escape(title)
    );
}

fn footer(out: &mut String) {
    out.push_str("</body>\n</html>\n");
}

fn link(out: &mut String, prefix: &str, hash: &str, label: &str) {
    let _ = write!(
        out,
        "<a href=\"/{prefix}/{}\">{}</a>",
        escape(hash),
        escape(label)
    );
}

fn landing(out: &mut String, model: &LandingPageModel) {
    out.push_str(
        "<table class=\"blocks\">\n<tr><th>Height</th><th>Hash</th><th>Time</th>\
         <th>Transactions</th><th>Total Sent</th><th>Size (kB)</th></tr>\n",
    );
    for row in &model.rows {
        let _ = write!(out, "<tr><td><a href=\"/b/{}\">{}</a></td><td>", row.height, row.height);
        link(out, "block", &row.hash, &row.display_hash);
        let _ = writeln!(
            out,
            "</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape(&row.timestamp),
            row.tx_count,
            escape(&row.total_value),
            escape(&row.size)
        );
    }
    out.push_str("</table>\n");
}

fn field(out: &mut String, name: &str, value: &str) {
    let _ = writeln!(out, "<tr><th>{}</th><td>{}</td></tr>", name, escape(value));
}

fn block(out: &mut String, model: &BlockPageModel) {
    out.push_str("<table class=\"block\">\n");
    field(out, "Hash", &model.hash);
    out.push_str("<tr><th>Previous Block</th><td>");
    match &model.previous_hash {
        Some(hash) => link(out, "block", hash, hash),
        None => out.push_str("none"),
    }
    out.push_str("</td></tr>\n<tr><th>Next Block</th><td>");
    match &model.next_hash {
        Some(hash) => link(out, "block", hash, hash),
        None => out.push_str("none"),
    }
    out.push_str("</td></tr>\n");
    field(out, "Height", &model.height.to_string());
    field(out, "Time", &model.timestamp);
    field(out, "Difficulty", &model.difficulty);
    field(out, "Bits", &model.bits);
    field(out, "Nonce", &model.nonce.to_string());
    field(out, "Merkle Root", &model.merkle_root);
    field(out, "Size (kB)", &model.size);
    field(out, "Transactions", &model.tx_count.to_string());
    field(out, "Total Sent", &model.total_value);
    out.push_str("</table>\n");
    let _ = writeln!(out, "<p><a href=\"/rawblock/{}\">raw block</a></p>", escape(&model.hash));

    out.push_str("<h2>Transactions</h2>\n");
    for tx_row in &model.txs {
        out.push_str("<div class=\"tx\"><h3>");
        link(out, "tx", &tx_row.hash, &tx_row.display_hash);
        let _ = writeln!(out, " ({})</h3>", escape(&tx_row.total_value));
        inputs_outputs(out, &tx_row.inputs, &tx_row.outputs);
        out.push_str("</div>\n");
    }
}

fn tx(out: &mut String, model: &TxPageModel) {
    out.push_str("<table class=\"tx\">\n");
    field(out, "Hash", &model.hash);
    if let Some(hash) = &model.block_hash {
        out.push_str("<tr><th>Block</th><td>");
        link(out, "block", hash, hash);
        out.push_str("</td></tr>\n");
    }
    if let Some(confirmations) = model.confirmations {
        field(out, "Confirmations", &confirmations.to_string());
    }
    field(out, "Total Output", &model.total_value);
    out.push_str("</table>\n");
    let _ = writeln!(out, "<p><a href=\"/rawtx/{}\">raw transaction</a></p>", escape(&model.hash));
    inputs_outputs(out, &model.inputs, &model.outputs);
}

fn inputs_outputs(out: &mut String, inputs: &[InputRow], outputs: &[OutputRow]) {
    out.push_str("<table class=\"io\">\n<tr><th>Inputs</th><th>Outputs</th></tr>\n<tr><td>\n");
    for input in inputs {
        out.push_str("<div class=\"vin\">");
        match (&input.coinbase, &input.previous_txid, input.previous_index) {
            (Some(coinbase), _, _) => {
                let _ = write!(out, "coinbase {}", escape(coinbase));
            }
            (None, Some(txid), Some(index)) => {
                link(out, "tx", txid, txid);
                let _ = write!(out, ":{index} <code>{}</code>", escape(&input.script_sig));
            }
            _ => out.push_str("unknown"),
        }
        out.push_str("</div>\n");
    }
    out.push_str("</td><td>\n");
    for output in outputs {
        let _ = writeln!(
            out,
            "<div class=\"vout\">{}: {} ({}) {}<br><code>{}</code></div>",
            output.index,
            escape(&output.value),
            escape(&output.script_type),
            escape(&output.addresses.join(", ")),
            escape(&output.script)
        );
    }
    out.push_str("</td></tr>\n</table>\n");
}

fn error(out: &mut String, model: &ErrorModel) {
    let _ = writeln!(out, "<p class=\"error\">{}</p>", escape(&model.message));
}
