use std::sync::Arc;

use log::info;

use crate::{
    actor::Actor,
    db::{
        models::{Lead, LeadDraft, LeadStatus},
        Database,
    },
    error::{Error, Result},
    settings::SettingsStore,
    stats::{compute_stats, DashboardStats},
};

/// Actor-scoped front door for the lead workflow.
///
/// Every mutation and listing takes the caller's [`Actor`] explicitly, so
/// partner visibility and the admin-only commission path are enforced here
/// rather than trusted to the UI.
#[derive(Clone)]
pub struct LeadService {
    db: Database,
    settings: Arc<SettingsStore>,
}

impl LeadService {
    pub fn new(db: Database, settings: Arc<SettingsStore>) -> Self {
        Self { db, settings }
    }

    /// Public inquiry submission; the one path that creates leads.
    pub async fn submit_inquiry(&self, draft: LeadDraft) -> Result<Lead> {
        let lead = self.db.create_lead(draft).await?;
        info!(
            "New inquiry {} for package {} (partner {})",
            lead.id, lead.package_id, lead.partner_id
        );
        Ok(lead)
    }

    /// Leads visible to the caller: everything for admins, own leads for
    /// partners. Public callers have no lead visibility.
    pub async fn list_leads(&self, actor: &Actor) -> Result<Vec<Lead>> {
        let scope = actor.lead_scope()?;
        self.db.list_leads(scope).await
    }

    pub async fn update_status(
        &self,
        actor: &Actor,
        lead_id: &str,
        new_status: LeadStatus,
    ) -> Result<Lead> {
        self.require_lead_access(actor, lead_id).await?;
        let strict = self.settings.lead_policy().strict_transitions;
        self.db.update_lead_status(lead_id, new_status, strict).await
    }

    /// Explicit escape hatch from Converted / Not Interested.
    pub async fn reopen(&self, actor: &Actor, lead_id: &str) -> Result<Lead> {
        self.require_lead_access(actor, lead_id).await?;
        self.db.reopen_lead(lead_id).await
    }

    /// Record commission payment for a converted lead. Admin only.
    pub async fn mark_commission_received(&self, actor: &Actor, lead_id: &str) -> Result<Lead> {
        if !actor.is_admin() {
            return Err(Error::Forbidden(
                "only admins can mark commission as received".into(),
            ));
        }
        self.db.mark_commission_received(lead_id).await
    }

    /// Summary statistics over the caller's visible leads, recomputed on
    /// every call.
    pub async fn dashboard_stats(&self, actor: &Actor) -> Result<DashboardStats> {
        let leads = self.list_leads(actor).await?;
        let policy = self.settings.lead_policy();
        Ok(compute_stats(&leads, policy.commission_per_conversion))
    }

    /// Admins may touch any lead; partners only their own assignments.
    /// Public callers are rejected by the scope lookup itself.
    async fn require_lead_access(&self, actor: &Actor, lead_id: &str) -> Result<()> {
        if let Some(partner_id) = actor.lead_scope()? {
            let lead = self.db.get_lead(lead_id).await?;
            if lead.partner_id != partner_id {
                return Err(Error::Forbidden(format!(
                    "lead {lead_id} is not assigned to partner {partner_id}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::TempDir;

    use super::*;
    use crate::db::testutil::{open_test_db, seed_reference, TestRefs};

    fn draft_for(package_id: &str) -> LeadDraft {
        LeadDraft {
            package_id: package_id.to_string(),
            customer_name: "John Doe".into(),
            customer_email: "john@example.com".into(),
            customer_phone: "555-0123".into(),
            travelers: 2,
            travel_date: NaiveDate::from_ymd_opt(2023, 12, 1).unwrap(),
            special_requirements: None,
        }
    }

    async fn service() -> (TempDir, LeadService, TestRefs) {
        let (dir, db) = open_test_db();
        let refs = seed_reference(&db).await;
        let settings = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        (dir, LeadService::new(db, Arc::new(settings)), refs)
    }

    #[tokio::test]
    async fn partner_sees_only_their_own_leads() {
        let (_dir, svc, refs) = service().await;

        svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        svc.submit_inquiry(draft_for(&refs.pkg2)).await.unwrap();

        let p1 = Actor::Partner("p1".into());
        let visible = svc.list_leads(&p1).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].partner_id, "p1");

        let all = svc.list_leads(&Actor::Admin).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn public_callers_cannot_list_leads() {
        let (_dir, svc, _refs) = service().await;
        let err = svc.list_leads(&Actor::Public).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn public_callers_cannot_update_status() {
        let (_dir, svc, refs) = service().await;

        let lead = svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        let err = svc
            .update_status(&Actor::Public, &lead.id, LeadStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));

        let unchanged = svc.list_leads(&Actor::Admin).await.unwrap();
        assert_eq!(unchanged[0].status, LeadStatus::New);
    }

    #[tokio::test]
    async fn partner_cannot_touch_another_partners_lead() {
        let (_dir, svc, refs) = service().await;

        let lead = svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        let p2 = Actor::Partner("p2".into());

        let err = svc
            .update_status(&p2, &lead.id, LeadStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[tokio::test]
    async fn owning_partner_can_update_status() {
        let (_dir, svc, refs) = service().await;

        let lead = svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        let p1 = Actor::Partner("p1".into());

        let updated = svc
            .update_status(&p1, &lead.id, LeadStatus::Contacted)
            .await
            .unwrap();
        assert_eq!(updated.status, LeadStatus::Contacted);
    }

    #[tokio::test]
    async fn commission_marking_is_admin_only() {
        let (_dir, svc, refs) = service().await;

        let lead = svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        svc.update_status(&Actor::Admin, &lead.id, LeadStatus::Converted)
            .await
            .unwrap();

        let p1 = Actor::Partner("p1".into());
        let err = svc
            .mark_commission_received(&p1, &lead.id)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));

        let marked = svc
            .mark_commission_received(&Actor::Admin, &lead.id)
            .await
            .unwrap();
        assert!(marked.commission_received);
    }

    #[tokio::test]
    async fn conversion_flow_moves_the_dashboard_numbers() {
        let (_dir, svc, refs) = service().await;

        let lead = svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        assert_eq!(lead.status, LeadStatus::New);

        let before = svc.dashboard_stats(&Actor::Admin).await.unwrap();
        assert_eq!(before.pending_count, 1);
        assert_eq!(before.estimated_revenue, 0);

        let converted = svc
            .update_status(&Actor::Admin, &lead.id, LeadStatus::Converted)
            .await
            .unwrap();
        assert!(!converted.commission_received);

        svc.mark_commission_received(&Actor::Admin, &lead.id)
            .await
            .unwrap();

        let after = svc.dashboard_stats(&Actor::Admin).await.unwrap();
        assert_eq!(after.estimated_revenue, before.estimated_revenue + 50);
        assert_eq!(after.pending_count, 0);
    }

    #[tokio::test]
    async fn partner_stats_are_scoped() {
        let (_dir, svc, refs) = service().await;

        svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        svc.submit_inquiry(draft_for(&refs.pkg2)).await.unwrap();

        let p2 = Actor::Partner("p2".into());
        let stats = svc.dashboard_stats(&p2).await.unwrap();
        assert_eq!(stats.total_leads, 1);
    }

    #[tokio::test]
    async fn strict_policy_flows_through_to_updates() {
        let (dir, db) = open_test_db();
        let refs = seed_reference(&db).await;
        let settings = SettingsStore::new(dir.path().join("settings.json")).unwrap();
        settings
            .update_lead_policy(crate::settings::LeadPolicy {
                commission_per_conversion: 50,
                strict_transitions: true,
            })
            .unwrap();
        let svc = LeadService::new(db, Arc::new(settings));

        let lead = svc.submit_inquiry(draft_for(&refs.pkg1)).await.unwrap();
        svc.update_status(&Actor::Admin, &lead.id, LeadStatus::Converted)
            .await
            .unwrap();

        let err = svc
            .update_status(&Actor::Admin, &lead.id, LeadStatus::Contacted)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidState(_)));

        let reopened = svc.reopen(&Actor::Admin, &lead.id).await.unwrap();
        assert_eq!(reopened.status, LeadStatus::Contacted);
    }
}
