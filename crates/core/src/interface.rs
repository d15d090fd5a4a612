use crate::{record::ContractCall, Error, Result};
use alloy::{
    dyn_abi::{DynSolType, DynSolValue, FunctionExt, JsonAbiExt},
    json_abi::{Function, JsonAbi},
    primitives::{Bytes, U256},
};
use serde::Deserialize;
use std::path::Path;

/// Shapes accepted for the contract interface file.
#[derive(Deserialize)]
#[serde(untagged)]
enum InterfaceFile {
    /// Hardhat/truffle-style build artifact.
    Artifact {
        abi: JsonAbi,
        #[serde(default)]
        bytecode: Option<Bytes>,
    },
    /// A bare ABI array.
    Abi(JsonAbi),
}

/// The ABI (and optionally the creation bytecode) of the target contract.
#[derive(Clone, Debug)]
pub struct ContractInterface {
    abi: JsonAbi,
    bytecode: Option<Bytes>,
}

impl ContractInterface {
    pub fn new(abi: JsonAbi, bytecode: Option<Bytes>) -> Self {
        Self { abi, bytecode }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents).map_err(|e| Error::InterfaceParse(path.to_owned(), e))
    }

    pub fn from_json(contents: &str) -> std::result::Result<Self, serde_json::Error> {
        let file: InterfaceFile = serde_json::from_str(contents)?;
        Ok(match file {
            InterfaceFile::Artifact { abi, bytecode } => Self::new(abi, bytecode),
            InterfaceFile::Abi(abi) => Self::new(abi, None),
        })
    }

    pub fn abi(&self) -> &JsonAbi {
        &self.abi
    }

    /// Returns the first overload of `name`.
    pub fn function(&self, name: &str) -> Result<&Function> {
        self.abi
            .function(name)
            .and_then(|overloads| overloads.first())
            .ok_or_else(|| Error::FunctionMissing(name.to_owned()))
    }

    /// Fails if any of `names` is missing, so a run can't die halfway through.
    pub fn ensure_functions<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<()> {
        for name in names {
            self.function(name)?;
        }
        Ok(())
    }

    /// Encodes calldata for `name`, coercing each string argument to its ABI type.
    pub fn encode_call(&self, name: &str, args: &[impl AsRef<str>]) -> Result<Bytes> {
        let func = self.function(name)?;
        if func.inputs.len() != args.len() {
            return Err(Error::FunctionArgCount {
                name: name.to_owned(),
                expected: func.inputs.len(),
                actual: args.len(),
            });
        }
        let values = func
            .inputs
            .iter()
            .zip(args)
            .map(|(input, arg)| {
                let mut argtype = String::new();
                input.full_selector_type_raw(&mut argtype);
                let r#type = DynSolType::parse(&argtype)?;
                Ok(r#type.coerce_str(arg.as_ref())?)
            })
            .collect::<Result<Vec<DynSolValue>>>()?;
        let input = func.abi_encode_input(&values)?;
        Ok(input.into())
    }

    pub fn encode_contract_call(&self, call: &ContractCall) -> Result<Bytes> {
        self.encode_call(call.kind.function_name(), &[call.param.to_string()])
    }

    /// Decodes the return data of a function whose only output is an unsigned integer.
    pub fn decode_uint_output(&self, name: &str, data: &[u8]) -> Result<U256> {
        let func = self.function(name)?;
        let values = func.abi_decode_output(data)?;
        match values.as_slice() {
            [value] => value
                .as_uint()
                .map(|(n, _)| n)
                .ok_or_else(|| Error::UnexpectedOutput(name.to_owned())),
            _ => Err(Error::UnexpectedOutput(name.to_owned())),
        }
    }

    /// Creation bytecode, if the interface file carried any.
    pub fn deploy_code(&self) -> Result<Bytes> {
        self.bytecode
            .clone()
            .filter(|code| !code.is_empty())
            .ok_or(Error::BytecodeMissing)
    }
}
