//! `demo` command - canned sample session
//!
//! Builds a small but complete assessment without any prompting and
//! prints its report. Useful for piping the report formats and for
//! exercising the full pipeline in integration tests.

use chrono::NaiveDate;
use console::style;
use miette::Result;

use crate::cli::commands::report;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::Importance;
use crate::core::session::Session;
use crate::core::workshop::{WORKSHOPS, WORKSHOP_COUNT};
use crate::entities::{
    Asset, AssetKind, BusinessValue, Control, ControlKind, CriterionKind, Frequency, Measure,
    MonitoringEntry, OperationalScenario, Risk, RiskSource, RiskTreatment, Scope,
    SecurityCriterion, SecurityNeed, SourceCategory, SourceObjectivePair, Stakeholder,
    StrategicScenario, TargetedObjective, Threat, TreatmentKind,
};

#[derive(clap::Args)]
pub struct DemoArgs {}

/// A complete five-workshop session for a small e-commerce perimeter
pub fn sample_session() -> Session {
    let mut session = Session::new();

    // Workshop 1
    session.scope = Scope {
        description: "Plateforme de vente en ligne et ses données clients".to_string(),
        constraints: vec!["Budget sécurité annuel limité".to_string()],
        assumptions: vec!["Hébergement chez un fournisseur cloud certifié".to_string()],
    };

    let mut direction = Stakeholder::new("Direction générale".to_string());
    direction.needs.push("Continuité de l'activité".to_string());
    let clients = Stakeholder::new("Clients".to_string());
    let direction_id = direction.id.clone();
    let clients_id = clients.id.clone();
    session.stakeholders.add(direction).expect("valid sample");
    session.stakeholders.add(clients).expect("valid sample");

    let mut data = BusinessValue::new(
        "Données clients".to_string(),
        "Identités, commandes et moyens de paiement".to_string(),
        Importance::Critical,
    );
    data.stakeholders = vec![direction_id.clone(), clients_id];
    let mut availability = BusinessValue::new(
        "Disponibilité du service".to_string(),
        "Prise de commande en continu".to_string(),
        Importance::High,
    );
    availability.stakeholders = vec![direction_id];
    let image = BusinessValue::new(
        "Image de marque".to_string(),
        "Confiance du public dans l'enseigne".to_string(),
        Importance::Medium,
    );
    let data_id = data.id.clone();
    let availability_id = availability.id.clone();
    session.business_values.add(data).expect("valid sample");
    session
        .business_values
        .add(availability)
        .expect("valid sample");
    session.business_values.add(image).expect("valid sample");

    let confidentiality = SecurityCriterion::new(
        "Confidentialité".to_string(),
        "Qui peut accéder aux données".to_string(),
        CriterionKind::Confidentiality,
    );
    let dispo = SecurityCriterion::new(
        "Disponibilité".to_string(),
        "Le service répond aux clients".to_string(),
        CriterionKind::Availability,
    );
    let confidentiality_id = confidentiality.id.clone();
    let dispo_id = dispo.id.clone();
    session
        .security_criteria
        .add(confidentiality)
        .expect("valid sample");
    session.security_criteria.add(dispo).expect("valid sample");

    session
        .security_needs
        .add(SecurityNeed::new(
            data_id.clone(),
            confidentiality_id,
            Importance::Critical,
            "Les commandes portent des données de paiement".to_string(),
        ))
        .expect("valid sample");
    session
        .security_needs
        .add(SecurityNeed::new(
            availability_id.clone(),
            dispo_id,
            Importance::High,
            "Chaque heure d'arrêt coûte du chiffre d'affaires".to_string(),
        ))
        .expect("valid sample");

    let mut db = Asset::new(
        "Serveur de base de données".to_string(),
        "Stocke les commandes et comptes clients".to_string(),
        AssetKind::Hardware,
    );
    db.business_values = vec![data_id.clone()];
    let mut webapp = Asset::new(
        "Application web".to_string(),
        "Front de vente exposé sur Internet".to_string(),
        AssetKind::Software,
    );
    webapp.business_values = vec![data_id.clone(), availability_id.clone()];
    session.assets.add(db).expect("valid sample");
    session.assets.add(webapp).expect("valid sample");

    session
        .threats
        .add(Threat::new(
            "Rançongiciel".to_string(),
            "Chiffrement des serveurs suivi d'une demande de rançon".to_string(),
        ))
        .expect("valid sample");
    session
        .threats
        .add(Threat::new(
            "Hameçonnage ciblé".to_string(),
            "Vol d'identifiants des administrateurs".to_string(),
        ))
        .expect("valid sample");

    // Workshop 2
    let mut crime = RiskSource::new(
        "Cybercriminels organisés".to_string(),
        "Groupes d'intrusion motivés par le gain financier".to_string(),
        SourceCategory::Organization,
    );
    crime.motivation = "Revente des données, extorsion".to_string();
    crime.capabilities.technical = 4;
    crime.capabilities.financial = 3;
    crime.capabilities.human = 3;
    crime
        .opportunities
        .push("Application web exposée".to_string());
    let mut insider = RiskSource::new(
        "Employé malveillant".to_string(),
        "Salarié disposant d'accès légitimes".to_string(),
        SourceCategory::Individual,
    );
    insider.motivation = "Ressentiment, revente d'accès".to_string();
    insider.capabilities.technical = 2;
    let crime_id = crime.id.clone();
    let insider_id = insider.id.clone();
    session.risk_sources.add(crime).expect("valid sample");
    session.risk_sources.add(insider).expect("valid sample");

    let steal = TargetedObjective::new(
        "Voler les données clients".to_string(),
        "Exfiltrer la base des commandes".to_string(),
        Importance::Critical,
    );
    let disrupt = TargetedObjective::new(
        "Interrompre le service".to_string(),
        "Rendre la prise de commande indisponible".to_string(),
        Importance::High,
    );
    let steal_id = steal.id.clone();
    let disrupt_id = disrupt.id.clone();
    session.objectives.add(steal).expect("valid sample");
    session.objectives.add(disrupt).expect("valid sample");

    session
        .pairs
        .add(SourceObjectivePair::new(
            crime_id.clone(),
            steal_id,
            3,
            "Capacité démontrée et marché de revente actif".to_string(),
        ))
        .expect("valid sample");
    session
        .pairs
        .add(SourceObjectivePair::new(
            insider_id.clone(),
            disrupt_id,
            2,
            "Accès possible mais forte traçabilité interne".to_string(),
        ))
        .expect("valid sample");

    // Workshop 3
    let mut breach = StrategicScenario::new(
        "Exfiltration de la base clients".to_string(),
        "Compromission de l'application web puis vol des données".to_string(),
    );
    breach.sources = vec![crime_id.clone()];
    breach.targeted_values = vec![data_id.clone()];
    breach.severity = 4;
    breach.likelihood = 3;
    breach.justification = "Surface exposée et motivation élevée".to_string();
    breach.controls.push(Control::new(
        "Pare-feu applicatif".to_string(),
        ControlKind::Preventive,
        2,
    ));

    let mut outage = StrategicScenario::new(
        "Sabotage interne du service".to_string(),
        "Arrêt volontaire des serveurs par un salarié".to_string(),
    );
    outage.sources = vec![insider_id];
    outage.targeted_values = vec![availability_id];
    outage.severity = 3;
    outage.likelihood = 2;

    let mut ransom = StrategicScenario::new(
        "Rançongiciel sur la production".to_string(),
        "Chiffrement des serveurs de production".to_string(),
    );
    ransom.sources = vec![crime_id];
    ransom.targeted_values = vec![data_id];
    ransom.severity = 4;
    ransom.likelihood = 2;

    let breach_id = breach.id.clone();
    let outage_id = outage.id.clone();
    let ransom_id = ransom.id.clone();
    session.strategic_scenarios.add(breach).expect("valid sample");
    session.strategic_scenarios.add(outage).expect("valid sample");
    session.strategic_scenarios.add(ransom).expect("valid sample");

    // Workshop 4
    let mut ops1 = OperationalScenario::new(
        "Injection SQL sur le front".to_string(),
        "Extraction de la base via une faille du moteur de recherche".to_string(),
        breach_id.clone(),
    );
    ops1.probability = 3;
    ops1.impact = 4;
    ops1.mode.details = "Exploitation distante sans authentification".to_string();
    let mut ops2 = OperationalScenario::new(
        "Arrêt des machines virtuelles".to_string(),
        "Utilisation d'un compte d'administration légitime".to_string(),
        outage_id.clone(),
    );
    ops2.probability = 2;
    ops2.impact = 3;
    session.operational_scenarios.add(ops1).expect("valid sample");
    session.operational_scenarios.add(ops2).expect("valid sample");

    let mut critical = Risk::new(breach_id.clone(), 4, 5);
    critical.comment = Some("Aucune détection d'exfiltration en place".to_string());
    session.risks.add(critical).expect("valid sample");
    session
        .risks
        .add(Risk::new(outage_id.clone(), 3, 4))
        .expect("valid sample");
    session
        .risks
        .add(Risk::new(ransom_id, 2, 3))
        .expect("valid sample");

    // Workshop 5
    let mut reduction = RiskTreatment::new(
        breach_id,
        TreatmentKind::Reduction,
        "Durcir l'application web et chiffrer la base".to_string(),
    );
    let mut waf = Measure::new(
        "Campagne de tests d'intrusion".to_string(),
        ControlKind::Preventive,
        3,
        NaiveDate::from_ymd_opt(2026, 12, 1).expect("valid date"),
    );
    waf.cost = 25_000.0;
    reduction.measures.push(waf);
    reduction.measures.push(Measure::new(
        "Chiffrement de la base clients".to_string(),
        ControlKind::Protective,
        4,
        NaiveDate::from_ymd_opt(2027, 3, 1).expect("valid date"),
    ));
    reduction.residual_risk.probability = 2;
    reduction.residual_risk.impact = 3;
    reduction.residual_risk.justification = "Après durcissement et chiffrement".to_string();

    let mut acceptance = RiskTreatment::new(
        outage_id,
        TreatmentKind::Acceptance,
        "Risque interne jugé acceptable avec la traçabilité actuelle".to_string(),
    );
    acceptance.residual_risk.probability = 2;
    acceptance.residual_risk.impact = 3;

    session.treatments.add(reduction).expect("valid sample");
    session.treatments.add(acceptance).expect("valid sample");

    let mut review = MonitoringEntry::new(
        "Revue trimestrielle des risques".to_string(),
        Frequency::Quarterly,
    );
    review
        .indicators
        .push("Nombre d'incidents de sécurité".to_string());
    review.stakeholders.push("Direction générale".to_string());
    session.monitoring_plan.add(review).expect("valid sample");

    // Every step of every workshop is complete in the sample
    for def in &WORKSHOPS {
        for index in 0..def.steps.len() {
            session.progress.mark_step_complete(def.id, index);
        }
    }
    while session.progress.current_workshop() < WORKSHOP_COUNT {
        session.progress.next_workshop();
    }

    session
}

pub fn run(_args: DemoArgs, global: &GlobalOpts) -> Result<()> {
    let session = sample_session();
    if !global.quiet && matches!(global.format, OutputFormat::Auto | OutputFormat::Text) {
        println!(
            "{}",
            style("Session d'exemple (aucune donnée saisie)").dim()
        );
    }
    report::render(&session, global)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_session_is_complete() {
        let session = sample_session();
        for id in 1..=WORKSHOP_COUNT {
            assert!(session.progress.is_workshop_complete(id));
        }
        assert_eq!(session.progress.current_workshop(), WORKSHOP_COUNT);
        assert!(session.unevaluated_scenarios().is_empty());
    }

    #[test]
    fn test_sample_session_report_builds() {
        let session = sample_session();
        let data = report::build(&session);
        assert_eq!(data.counts.risks, 3);
        assert_eq!(data.distribution.total(), 3);
        // 4x5=20 -> Critique, 3x4=12 -> Moyen, 2x3=6 -> Faible
        assert_eq!(data.distribution.critical, 1);
        assert_eq!(data.distribution.medium, 1);
        assert_eq!(data.distribution.low, 1);
        assert_eq!(data.radar.len(), 3);
    }
}
