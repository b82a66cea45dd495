//! A small trade-document catalog exercising the whole engine surface:
//! inheritance, shorthand nesting, hooks, lists, tag overrides, and the
//! namespace-reset document root.

use modello_core::{Date, Decimal, FieldSpec, RecordDef, RecordInstance, values};
use std::sync::Arc;

pub const NS: &str = "urn:example:trade:v1";

pub struct Catalog {
    pub fiscal_id: Arc<RecordDef>,
    pub sender_id: Arc<RecordDef>,
    pub transmission: Arc<RecordDef>,
    pub party_name: Arc<RecordDef>,
    pub seller: Arc<RecordDef>,
    pub buyer: Arc<RecordDef>,
    pub header: Arc<RecordDef>,
    pub general: Arc<RecordDef>,
    pub line_item: Arc<RecordDef>,
    pub vat_summary: Arc<RecordDef>,
    pub body: Arc<RecordDef>,
    pub document: Arc<RecordDef>,
    pub standard_document: Arc<RecordDef>,
}

pub fn catalog() -> Catalog {
    let fiscal_id = RecordDef::define("fiscal_id")
        .field(FieldSpec::text("country").len(2).build().unwrap())
        .field(FieldSpec::text("code").max_len(28).build().unwrap())
        .finish()
        .unwrap();

    let sender_id = RecordDef::define("sender_id")
        .parent(&fiscal_id)
        .finish()
        .unwrap();

    let transmission = RecordDef::define("transmission")
        .record("sender", &sender_id)
        .field(FieldSpec::counter("sequence").build())
        .field(
            FieldSpec::text("format")
                .len(5)
                .choices(&["STD12", "GOV12"])
                .build()
                .unwrap(),
        )
        .field(
            FieldSpec::text("recipient_code")
                .min_len(6)
                .max_len(7)
                .nullable()
                .build()
                .unwrap(),
        )
        .field(
            FieldSpec::text("recipient_inbox")
                .min_len(8)
                .max_len(256)
                .nullable()
                .build()
                .unwrap(),
        )
        .check(|instance, ctx| {
            let code = instance.is_set("recipient_code");
            let inbox = instance.is_set("recipient_inbox");
            if code == inbox {
                ctx.fail(
                    &["recipient_code", "recipient_inbox"],
                    "exactly one of recipient_code or recipient_inbox must be set",
                );
            }
        })
        .finish()
        .unwrap();

    let party_name = RecordDef::define("party_name")
        .field(FieldSpec::text("company").max_len(80).nullable().build().unwrap())
        .field(FieldSpec::text("first").max_len(60).nullable().build().unwrap())
        .field(FieldSpec::text("last").max_len(60).nullable().build().unwrap())
        .check(|instance, ctx| {
            if instance.is_set("company") {
                if instance.is_set("first") || instance.is_set("last") {
                    ctx.fail(
                        &["company", "first", "last"],
                        "first and last must not be set when company is set",
                    );
                }
            } else if !instance.is_set("first") || !instance.is_set("last") {
                ctx.fail(
                    &["company", "first", "last"],
                    "first and last must both be set when company is empty",
                );
            }
        })
        .finish()
        .unwrap();

    let seller = RecordDef::define("seller")
        .record("fiscal_id", &fiscal_id)
        .record("name", &party_name)
        .field(FieldSpec::text("reference").max_len(20).nullable().build().unwrap())
        .finish()
        .unwrap();

    let buyer = RecordDef::define("buyer")
        .record("fiscal_id", &fiscal_id)
        .record("name", &party_name)
        .finish()
        .unwrap();

    let header = RecordDef::define("header")
        .record("transmission", &transmission)
        .record("seller", &seller)
        .record("buyer", &buyer)
        .finish()
        .unwrap();

    let general = RecordDef::define("general")
        .field(FieldSpec::text("currency").len(3).build().unwrap())
        .field(FieldSpec::date("issue_date").build())
        .field(FieldSpec::text("number").max_len(20).build().unwrap())
        .field(FieldSpec::decimal("total").max_digits(15).nullable().build().unwrap())
        .finish()
        .unwrap();

    let line_item = RecordDef::define("line_item")
        .field(FieldSpec::int("line_no").max_digits(4).build())
        .field(FieldSpec::text("description").max_len(1000).build().unwrap())
        .field(FieldSpec::decimal("quantity").max_digits(21).nullable().build().unwrap())
        .field(FieldSpec::decimal("unit_price").max_digits(21).build().unwrap())
        .field(FieldSpec::decimal("total").max_digits(21).build().unwrap())
        .field(
            FieldSpec::decimal("vat_rate")
                .tag("VATRate")
                .max_digits(6)
                .build()
                .unwrap(),
        )
        .finish()
        .unwrap();

    let vat_summary = RecordDef::define("vat_summary")
        .field(
            FieldSpec::decimal("vat_rate")
                .tag("VATRate")
                .max_digits(6)
                .build()
                .unwrap(),
        )
        .field(FieldSpec::decimal("taxable").max_digits(15).build().unwrap())
        .field(FieldSpec::decimal("tax").max_digits(15).build().unwrap())
        .finish()
        .unwrap();

    let body = RecordDef::define("body")
        .record("general", &general)
        .field(FieldSpec::nested_list("lines", &line_item).build())
        .field(FieldSpec::nested_list("summary", &vat_summary).build())
        .finish()
        .unwrap();

    let document = RecordDef::define("document")
        .tag("TradeDocument")
        .record("header", &header)
        .record("body", &body)
        .finish()
        .unwrap();

    // specialization: pins the transmission format from the root before
    // any nested validation runs
    let standard_document = RecordDef::define("standard_document")
        .parent(&document)
        .tag("TradeDocument")
        .attr("versione", "STD12")
        .prepare(|instance| {
            if let Some(header) = instance.record_mut("header") {
                if let Some(tx) = header.record_mut("transmission") {
                    let _ = tx.set("format", "STD12");
                }
            }
        })
        .finish()
        .unwrap();

    Catalog {
        fiscal_id,
        sender_id,
        transmission,
        party_name,
        seller,
        buyer,
        header,
        general,
        line_item,
        vat_summary,
        body,
        document,
        standard_document,
    }
}

/// A complete, valid standard document. The transmission format is left
/// absent on purpose: the specialization's prepare hook supplies it.
pub fn sample_document(cat: &Catalog) -> RecordInstance {
    let sender = cat
        .sender_id
        .instantiate(values!["country" => "IT", "code" => "01234567890"])
        .unwrap();

    let transmission = cat
        .transmission
        .instantiate(values![
            "sender" => sender,
            "sequence" => "00001",
            "recipient_code" => "ABC1234",
        ])
        .unwrap();

    let seller = cat
        .seller
        .instantiate(values![
            "fiscal_id" => cat
                .fiscal_id
                .instantiate(values!["country" => "IT", "code" => "01234567890"])
                .unwrap(),
            "name" => cat
                .party_name
                .instantiate(values!["company" => "ACME srl"])
                .unwrap(),
        ])
        .unwrap();

    let buyer = cat
        .buyer
        .instantiate(values![
            "fiscal_id" => cat
                .fiscal_id
                .instantiate(values!["country" => "IT", "code" => "09876543210"])
                .unwrap(),
            "name" => cat
                .party_name
                .instantiate(values!["first" => "Ada", "last" => "Rossi"])
                .unwrap(),
        ])
        .unwrap();

    let header = cat
        .header
        .instantiate(values![
            "transmission" => transmission,
            "seller" => seller,
            "buyer" => buyer,
        ])
        .unwrap();

    let general = cat
        .general
        .instantiate(values![
            "currency" => "EUR",
            "issue_date" => Date::new(2025, 3, 7).unwrap(),
            "number" => "2025/0042",
            "total" => Decimal::new(12200, 2),
        ])
        .unwrap();

    let mut body = cat
        .body
        .instantiate(values!["general" => general])
        .unwrap();

    for (n, desc, price) in [(1i64, "widget", Decimal::new(5000, 2)), (2, "gadget", Decimal::new(3500, 2))] {
        body.push_item(
            "lines",
            cat.line_item
                .instantiate(values![
                    "line_no" => n,
                    "description" => desc,
                    "quantity" => Decimal::new(100, 2),
                    "unit_price" => price,
                    "total" => price,
                    "vat_rate" => Decimal::new(2200, 2),
                ])
                .unwrap(),
        )
        .unwrap();
    }

    body.push_item(
        "summary",
        cat.vat_summary
            .instantiate(values![
                "vat_rate" => Decimal::new(2200, 2),
                "taxable" => Decimal::new(10000, 2),
                "tax" => Decimal::new(2200, 2),
            ])
            .unwrap(),
    )
    .unwrap();

    cat.standard_document
        .instantiate(values!["header" => header, "body" => body])
        .unwrap()
}
