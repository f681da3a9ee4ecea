//! # 集成配置服务
//!
//! 负责配置读写、密钥生命周期以及保存前的连接测试

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::{IntegrationError, IntegrationResult};
use super::model::IntegrationConfig;
use super::repository::IntegrationRepository;
use super::tester::ConnectionTester;
use crate::crypto::{SecretCodec, is_unchanged, mask_secret};

/// 本次请求解析出的密钥
#[derive(Debug, PartialEq, Eq)]
struct ResolvedSecret {
    /// 将要保存的密文
    stored: String,
    /// 连接测试使用的明文
    plaintext: String,
    /// 是否重新加密
    reencrypted: bool,
}

/// 判断提交的密钥是否为未修改的脱敏值，必要时重新加密
fn resolve_secret(
    codec: &SecretCodec,
    stored: &str,
    submitted: &str,
) -> IntegrationResult<ResolvedSecret> {
    let previous = codec.decrypt(stored);

    match previous {
        Ok(plaintext) if is_unchanged(submitted, &plaintext) => Ok(ResolvedSecret {
            stored: stored.to_string(),
            plaintext,
            reencrypted: false,
        }),
        Err(_) if submitted.is_empty() => Ok(ResolvedSecret {
            stored: stored.to_string(),
            plaintext: String::new(),
            reencrypted: false,
        }),
        _ => {
            let ciphertext = codec
                .encrypt(submitted)
                .map_err(|e| IntegrationError::SecretEncryptionFailed(e.to_string()))?;
            Ok(ResolvedSecret {
                stored: ciphertext,
                plaintext: submitted.to_string(),
                reencrypted: true,
            })
        }
    }
}

/// 企业 ID 直接与已保存值的脱敏结果比较
fn resolve_corp_id(stored: &str, submitted: &str) -> String {
    if submitted == mask_secret(stored) {
        stored.to_string()
    } else {
        submitted.to_string()
    }
}

/// 集成配置服务
#[derive(Clone)]
pub struct IntegrationService {
    repo: IntegrationRepository,
    codec: Arc<SecretCodec>,
    tester: Arc<dyn ConnectionTester>,
}

impl IntegrationService {
    #[must_use]
    pub fn new(
        repo: IntegrationRepository,
        codec: Arc<SecretCodec>,
        tester: Arc<dyn ConnectionTester>,
    ) -> Self {
        Self { repo, codec, tester }
    }

    /// 读取配置，不存在时创建未启用的默认记录
    ///
    /// 返回值中的 `app_secret` 与 `corp_id` 均为脱敏值
    pub async fn get_config(&self, classify: i32) -> IntegrationResult<IntegrationConfig> {
        let model = match self.repo.find_by_classify(classify).await? {
            Some(model) => model,
            None => {
                info!(classify, "集成配置不存在，创建默认记录");
                self.repo.create_default(classify).await?
            }
        };

        let mut config = IntegrationConfig::from(model);
        config.app_secret = match self.codec.decrypt(&config.app_secret) {
            Ok(plaintext) => mask_secret(&plaintext),
            Err(e) => {
                if !config.app_secret.is_empty() {
                    warn!(classify, error = %e, "AppSecret 解密失败");
                }
                String::new()
            }
        };
        config.corp_id = mask_secret(&config.corp_id);

        Ok(config)
    }

    /// 更新配置
    ///
    /// 启用状态或 `test_only` 时先做连接测试，测试失败不会写库；
    /// `test_only` 时无论结果如何都不写库
    pub async fn set_config(
        &self,
        incoming: IntegrationConfig,
        code: &str,
        test_only: bool,
    ) -> IntegrationResult<()> {
        let classify = incoming.classify;
        let existing = self
            .repo
            .find_by_classify(classify)
            .await?
            .ok_or(IntegrationError::NotFound { classify })?;

        let secret = resolve_secret(&self.codec, &existing.app_secret, &incoming.app_secret)?;
        let corp_id = resolve_corp_id(&existing.corp_id, &incoming.corp_id);
        debug!(classify, reencrypted = secret.reencrypted, "解析 AppSecret");

        let mut resolved = IntegrationConfig {
            app_secret: secret.plaintext,
            corp_id,
            ..incoming
        };

        if resolved.status || test_only {
            self.tester
                .test_connection(&resolved, code)
                .await
                .map_err(|e| {
                    warn!(classify, error = %e, "连接测试失败");
                    e.connection_test_failed()
                })?;
        }

        if test_only {
            info!(classify, "连接测试通过，未保存配置");
            return Ok(());
        }

        resolved.app_secret = secret.stored;
        self.repo.update_fields(existing.id, &resolved).await?;

        info!(classify, status = resolved.status, "集成配置已更新");
        Ok(())
    }
}
