//! XML-RPC encoder and decoder.
//!
//! Encoding writes the document directly into a `String`. Decoding first
//! folds `quick-xml` events into a small element tree, then interprets it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{Value, XmlRpcError};

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// A decoded `methodCall` document.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub params: Vec<Value>,
}

/// Encode a `methodCall` document.
pub fn encode_call(method: &str, params: &[Value]) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(XML_DECL);
    out.push_str("<methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

/// Encode a successful `methodResponse` carrying one value.
pub fn encode_response(value: &Value) -> String {
    let mut out = String::with_capacity(256);
    out.push_str(XML_DECL);
    out.push_str("<methodResponse><params><param>");
    write_value(&mut out, value);
    out.push_str("</param></params></methodResponse>");
    out
}

/// Encode a fault `methodResponse`.
pub fn encode_fault(code: i64, message: &str) -> String {
    let fault = Value::structure([
        ("faultCode", Value::Int(code)),
        ("faultString", Value::from(message)),
    ]);
    let mut out = String::with_capacity(256);
    out.push_str(XML_DECL);
    out.push_str("<methodResponse><fault>");
    write_value(&mut out, &fault);
    out.push_str("</fault></methodResponse>");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Int(i) if i32::try_from(*i).is_ok() => {
            let _ = write!(out, "<int>{}</int>", i);
        }
        Value::Int(i) => {
            let _ = write!(out, "<i8>{}</i8>", i);
        }
        Value::Bool(b) => {
            let _ = write!(out, "<boolean>{}</boolean>", u8::from(*b));
        }
        Value::String(s) => {
            let _ = write!(out, "<string>{}</string>", escape(s.as_str()));
        }
        Value::Double(d) => {
            let _ = write!(out, "<double>{}</double>", d);
        }
        Value::DateTime(s) => {
            let _ = write!(out, "<dateTime.iso8601>{}</dateTime.iso8601>", escape(s.as_str()));
        }
        Value::Base64(s) => {
            let _ = write!(out, "<base64>{}</base64>", escape(s.as_str()));
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                let _ = write!(out, "<member><name>{}</name>", escape(name.as_str()));
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
}

/// Decode a `methodResponse` document.
///
/// A `<fault>` response is returned as [`XmlRpcError::Fault`].
pub fn decode_response(xml: &str) -> Result<Value, XmlRpcError> {
    let root = parse_tree(xml)?;
    root.expect_name("methodResponse")?;

    if let Some(fault) = root.child("fault") {
        let value = decode_value(fault.required("value")?)?;
        let code = match value.get("faultCode") {
            Some(Value::Int(code)) => *code,
            _ => 0,
        };
        let message = match value.get("faultString") {
            Some(Value::String(message)) => message.clone(),
            _ => String::from("unknown fault"),
        };
        return Err(XmlRpcError::Fault { code, message });
    }

    let param = root.required("params")?.required("param")?;
    decode_value(param.required("value")?)
}

/// Decode a `methodCall` document.
pub fn decode_call(xml: &str) -> Result<MethodCall, XmlRpcError> {
    let root = parse_tree(xml)?;
    root.expect_name("methodCall")?;

    let method = root.required("methodName")?.text.trim().to_string();
    let params = match root.child("params") {
        Some(params) => params
            .children_named("param")
            .map(|p| decode_value(p.required("value")?))
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(MethodCall { method, params })
}

fn decode_value(el: &Element) -> Result<Value, XmlRpcError> {
    // An untyped <value> is a string
    let Some(typed) = el.children.first() else {
        return Ok(Value::String(el.text.clone()));
    };

    let text = typed.text.trim();
    match typed.name.as_str() {
        "int" | "i4" | "i8" => text
            .parse()
            .map(Value::Int)
            .map_err(|_| XmlRpcError::Malformed(format!("invalid integer `{}`", text))),
        "boolean" => match text {
            "1" | "true" => Ok(Value::Bool(true)),
            "0" | "false" => Ok(Value::Bool(false)),
            _ => Err(XmlRpcError::Malformed(format!("invalid boolean `{}`", text))),
        },
        "string" => Ok(Value::String(typed.text.clone())),
        "double" => text
            .parse()
            .map(Value::Double)
            .map_err(|_| XmlRpcError::Malformed(format!("invalid double `{}`", text))),
        "dateTime.iso8601" => Ok(Value::DateTime(text.to_string())),
        "base64" => Ok(Value::Base64(text.to_string())),
        "nil" => Ok(Value::Nil),
        "array" => {
            let items = match typed.child("data") {
                Some(data) => data
                    .children_named("value")
                    .map(decode_value)
                    .collect::<Result<Vec<_>, _>>()?,
                None => Vec::new(),
            };
            Ok(Value::Array(items))
        }
        "struct" => {
            let mut members = BTreeMap::new();
            for member in typed.children_named("member") {
                let name = member.required("name")?.text.clone();
                let value = decode_value(member.required("value")?)?;
                members.insert(name, value);
            }
            Ok(Value::Struct(members))
        }
        other => Err(XmlRpcError::Unsupported(other.to_string())),
    }
}

#[derive(Debug, Default)]
struct Element {
    name: String,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn new(name: &[u8]) -> Result<Self, XmlRpcError> {
        let name = std::str::from_utf8(name)
            .map_err(|e| XmlRpcError::Malformed(format!("tag name is not UTF-8: {}", e)))?;
        Ok(Self {
            name: name.to_string(),
            ..Default::default()
        })
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    fn required(&self, name: &str) -> Result<&Element, XmlRpcError> {
        self.child(name).ok_or_else(|| {
            XmlRpcError::Malformed(format!("<{}> is missing <{}>", self.name, name))
        })
    }

    fn expect_name(&self, name: &str) -> Result<(), XmlRpcError> {
        if self.name == name {
            Ok(())
        } else {
            Err(XmlRpcError::Malformed(format!(
                "expected <{}>, found <{}>",
                name, self.name
            )))
        }
    }
}

fn parse_tree(xml: &str) -> Result<Element, XmlRpcError> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Element::new(e.local_name().as_ref())?),
            Ok(Event::Empty(e)) => {
                let el = Element::new(e.local_name().as_ref())?;
                attach(&mut stack, &mut root, el)?;
            }
            Ok(Event::End(_)) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| XmlRpcError::Malformed("unbalanced end tag".into()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Ok(Event::Text(t)) => {
                if let Some(top) = stack.last_mut() {
                    let text = t
                        .unescape()
                        .map_err(|e| XmlRpcError::Malformed(e.to_string()))?;
                    top.text.push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(top) = stack.last_mut() {
                    let bytes = c.into_inner();
                    let text = std::str::from_utf8(&bytes)
                        .map_err(|e| XmlRpcError::Malformed(e.to_string()))?;
                    top.text.push_str(text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(XmlRpcError::Malformed(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(XmlRpcError::Malformed("unexpected end of document".into()));
    }
    root.ok_or_else(|| XmlRpcError::Malformed("empty document".into()))
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    el: Element,
) -> Result<(), XmlRpcError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(el),
        None if root.is_none() => *root = Some(el),
        None => return Err(XmlRpcError::Malformed("multiple root elements".into())),
    }
    Ok(())
}
