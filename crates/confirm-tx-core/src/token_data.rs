//! Decoding of standard token contract calls.

use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::Function;
use alloy::primitives::hex;

use crate::domain::{TokenArg, TokenData};

struct StandardFunction {
    signature: &'static str,
    params: &'static [&'static str],
}

/// ERC-20, ERC-721 and ERC-1155 calls. Shared selectors (`approve`,
/// `transferFrom`) resolve to the first entry, which is the ERC-20 naming.
const STANDARD_FUNCTIONS: &[StandardFunction] = &[
    StandardFunction {
        signature: "transfer(address,uint256)",
        params: &["_to", "_value"],
    },
    StandardFunction {
        signature: "approve(address,uint256)",
        params: &["_spender", "_value"],
    },
    StandardFunction {
        signature: "transferFrom(address,address,uint256)",
        params: &["_from", "_to", "_value"],
    },
    StandardFunction {
        signature: "increaseAllowance(address,uint256)",
        params: &["spender", "increment"],
    },
    StandardFunction {
        signature: "safeTransferFrom(address,address,uint256)",
        params: &["_from", "_to", "_tokenId"],
    },
    StandardFunction {
        signature: "safeTransferFrom(address,address,uint256,bytes)",
        params: &["_from", "_to", "_tokenId", "_data"],
    },
    StandardFunction {
        signature: "setApprovalForAll(address,bool)",
        params: &["_operator", "_approved"],
    },
    StandardFunction {
        signature: "safeTransferFrom(address,address,uint256,uint256,bytes)",
        params: &["_from", "_to", "_id", "_value", "_data"],
    },
    StandardFunction {
        signature: "safeBatchTransferFrom(address,address,uint256[],uint256[],bytes)",
        params: &["_from", "_to", "_ids", "_values", "_data"],
    },
];

/// Decodes `data` as one of the standard token calls. Returns `None` for
/// unknown selectors and for arguments that do not decode.
pub fn parse_standard_token_transaction_data(data: &str) -> Option<TokenData> {
    let bytes = hex::decode(data.trim().strip_prefix("0x").unwrap_or(data.trim())).ok()?;
    if bytes.len() < 4 {
        return None;
    }

    for standard in STANDARD_FUNCTIONS {
        let Ok(func) = Function::parse(standard.signature) else {
            continue;
        };
        if func.selector().as_slice() != &bytes[..4] {
            continue;
        }
        let Ok(decoded) = func.abi_decode_input(&bytes[4..], true) else {
            continue;
        };
        let args = decoded
            .iter()
            .zip(func.inputs.iter())
            .zip(standard.params.iter())
            .map(|((value, input), name)| TokenArg {
                name: (*name).to_owned(),
                typ: input.ty.clone(),
                value: format_value(value),
            })
            .collect();
        return Some(TokenData {
            name: func.name.clone(),
            args,
        });
    }
    None
}

fn format_value(val: &DynSolValue) -> String {
    match val {
        DynSolValue::Bool(b) => b.to_string(),
        DynSolValue::Uint(u, _) => u.to_string(),
        DynSolValue::Address(a) => a.to_string(),
        DynSolValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        DynSolValue::Array(arr) | DynSolValue::FixedArray(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            format!("[{}]", items.join(", "))
        }
        other => format!("{other:?}"),
    }
}
