use crate::storage::UrlRecord;
use migration::entities::url_record;

pub fn model_to_record(model: url_record::Model) -> UrlRecord {
    UrlRecord {
        short_code: model.short_code,
        long_url: model.long_url,
        created_at: model.created_at,
        owner_id: model.owner_id,
    }
}

pub fn record_to_active_model(record: &UrlRecord) -> url_record::ActiveModel {
    use sea_orm::ActiveValue::Set;

    url_record::ActiveModel {
        short_code: Set(record.short_code.clone()),
        long_url: Set(record.long_url.clone()),
        created_at: Set(record.created_at),
        owner_id: Set(record.owner_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::ActiveValue;

    #[test]
    fn test_model_to_record() {
        let now = Utc::now();
        let model = url_record::Model {
            short_code: "k3x9q1".to_string(),
            long_url: "https://example.com/a".to_string(),
            created_at: now,
            owner_id: Some("7".to_string()),
        };

        let record = model_to_record(model);
        assert_eq!(record.short_code, "k3x9q1");
        assert_eq!(record.long_url, "https://example.com/a");
        assert_eq!(record.created_at, now);
        assert_eq!(record.owner_id.as_deref(), Some("7"));
    }

    #[test]
    fn test_active_model_sets_every_column() {
        let record = UrlRecord::new("promo", "https://example.com", None);
        let active = record_to_active_model(&record);

        assert!(matches!(active.short_code, ActiveValue::Set(ref c) if c == "promo"));
        assert!(matches!(active.long_url, ActiveValue::Set(_)));
        assert!(matches!(active.created_at, ActiveValue::Set(_)));
        assert!(matches!(active.owner_id, ActiveValue::Set(None)));
    }
}
