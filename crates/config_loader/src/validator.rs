//! 配置校验模块
//!
//! 校验规则：
//! - service / logger / channel 名称非空 (validator derive)
//! - channel 名称唯一
//! - email channel 需要合法 address
//! - sms channel 需要合法 phone
//! - outbox channel 需要非空 path
//! - header / signature 文本非空

use std::collections::HashSet;

use contracts::{
    is_valid_email, is_valid_phone, ChannelConfig, ChannelType, ContractError, Decoration,
    ServiceBlueprint, PARAM_ADDRESS, PARAM_PATH, PARAM_PHONE,
};
use validator::{Validate, ValidationErrors};

/// 校验 ServiceBlueprint 配置
///
/// 返回第一个遇到的错误，或 Ok(())。
pub fn validate(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    validate_derived(blueprint)?;
    validate_channel_names(blueprint)?;
    validate_channel_params(blueprint)?;
    validate_decorations(blueprint)?;
    Ok(())
}

/// 执行 derive(Validate) 规则
fn validate_derived(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    blueprint
        .service
        .validate()
        .map_err(|e| derived_error("service", e))?;
    blueprint
        .logger
        .validate()
        .map_err(|e| derived_error("logger", e))?;
    for (idx, channel) in blueprint.channels.iter().enumerate() {
        channel
            .validate()
            .map_err(|e| derived_error(&format!("channels[{idx}]"), e))?;
    }
    Ok(())
}

/// 将 ValidationErrors 转换为第一个字段错误
fn derived_error(prefix: &str, errors: ValidationErrors) -> ContractError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.iter().collect();
    fields.sort_by_key(|(field, _)| field.to_string());

    match fields.first() {
        Some((field, errs)) => {
            let message = errs
                .first()
                .and_then(|e| e.message.as_ref())
                .map(|m| m.to_string())
                .unwrap_or_else(|| "invalid value".to_string());
            ContractError::config_validation(format!("{prefix}.{field}"), message)
        }
        None => ContractError::config_validation(prefix, errors.to_string()),
    }
}

/// 校验 channel 名称唯一性
fn validate_channel_names(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for channel in &blueprint.channels {
        if !seen.insert(channel.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("channels[name={}]", channel.name),
                "duplicate channel name",
            ));
        }
    }
    Ok(())
}

/// 校验各类型 channel 的必填参数
fn validate_channel_params(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    for channel in &blueprint.channels {
        match channel.channel_type {
            ChannelType::Email => {
                let address = required_param(channel, PARAM_ADDRESS)?;
                if !is_valid_email(address) {
                    return Err(ContractError::config_validation(
                        param_field(channel, PARAM_ADDRESS),
                        format!("invalid e-mail address '{address}'"),
                    ));
                }
            }
            ChannelType::Sms => {
                let phone = required_param(channel, PARAM_PHONE)?;
                if !is_valid_phone(phone) {
                    return Err(ContractError::config_validation(
                        param_field(channel, PARAM_PHONE),
                        format!("invalid phone number '{phone}'"),
                    ));
                }
            }
            ChannelType::Outbox => {
                required_param(channel, PARAM_PATH)?;
            }
            ChannelType::Popup => {}
        }
    }
    Ok(())
}

fn required_param<'a>(channel: &'a ChannelConfig, key: &str) -> Result<&'a str, ContractError> {
    match channel.param(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ContractError::config_validation(
            param_field(channel, key),
            format!(
                "{} channel requires param '{key}'",
                channel.channel_type.as_str()
            ),
        )),
    }
}

fn param_field(channel: &ChannelConfig, key: &str) -> String {
    format!("channels[{}].params.{key}", channel.name)
}

/// 校验装饰配置
fn validate_decorations(blueprint: &ServiceBlueprint) -> Result<(), ContractError> {
    for (idx, decoration) in blueprint.decorations.iter().enumerate() {
        let empty = match decoration {
            Decoration::Header { text } => text.trim().is_empty(),
            Decoration::Signature { signer } => signer.trim().is_empty(),
            Decoration::Timestamp => false,
        };
        if empty {
            return Err(ContractError::config_validation(
                format!("decorations[{idx}]"),
                "decoration text cannot be empty",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blueprint(channels: Vec<ChannelConfig>) -> ServiceBlueprint {
        ServiceBlueprint::with_channels(channels)
    }

    fn validation_field(result: Result<(), ContractError>) -> String {
        match result {
            Err(ContractError::ConfigValidation { field, .. }) => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_blueprint() {
        let bp = blueprint(vec![
            ChannelConfig::new("ops", ChannelType::Email).with_param(PARAM_ADDRESS, "ops@example.com"),
            ChannelConfig::new("pager", ChannelType::Sms).with_param(PARAM_PHONE, "+15550100"),
            ChannelConfig::new("desktop", ChannelType::Popup),
            ChannelConfig::new("outbox", ChannelType::Outbox).with_param(PARAM_PATH, "out.jsonl"),
        ]);
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_duplicate_channel_name() {
        let bp = blueprint(vec![
            ChannelConfig::new("desktop", ChannelType::Popup),
            ChannelConfig::new("desktop", ChannelType::Popup),
        ]);
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_empty_channel_name() {
        let bp = blueprint(vec![ChannelConfig::new("", ChannelType::Popup)]);
        assert_eq!(validation_field(validate(&bp)), "channels[0].name");
    }

    #[test]
    fn test_empty_service_name() {
        let mut bp = blueprint(Vec::new());
        bp.service.name = String::new();
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("service name cannot be empty"));
    }

    #[test]
    fn test_email_requires_address() {
        let bp = blueprint(vec![ChannelConfig::new("ops", ChannelType::Email)]);
        assert_eq!(
            validation_field(validate(&bp)),
            "channels[ops].params.address"
        );
    }

    #[test]
    fn test_email_rejects_bad_address() {
        let bp = blueprint(vec![
            ChannelConfig::new("ops", ChannelType::Email).with_param(PARAM_ADDRESS, "not-an-email")
        ]);
        let err = validate(&bp).unwrap_err();
        assert!(err.to_string().contains("invalid e-mail address"));
    }

    #[test]
    fn test_sms_rejects_bad_phone() {
        let bp = blueprint(vec![
            ChannelConfig::new("pager", ChannelType::Sms).with_param(PARAM_PHONE, "call me")
        ]);
        assert_eq!(
            validation_field(validate(&bp)),
            "channels[pager].params.phone"
        );
    }

    #[test]
    fn test_outbox_requires_path() {
        let bp = blueprint(vec![
            ChannelConfig::new("outbox", ChannelType::Outbox).with_param(PARAM_PATH, "  ")
        ]);
        assert!(validate(&bp).is_err());
    }

    #[test]
    fn test_empty_signature_rejected() {
        let mut bp = blueprint(Vec::new());
        bp.decorations = vec![
            Decoration::Timestamp,
            Decoration::Signature {
                signer: " ".to_string(),
            },
        ];
        assert_eq!(validation_field(validate(&bp)), "decorations[1]");
    }
}
