use crate::query::{options_of, Facet, Schema};
use crate::records::{
    Audit, Choice, Document, DocumentCategory, DocumentStatus, Domain, NcStatus, NonConformance,
    ScheduleStatus, TrainingSession,
};

pub static DOCUMENTS: Schema<Document> = Schema {
    domain: Domain::Documents,
    identifier: document_id,
    search_fields: &[document_title],
    filter: Facet {
        field: "category",
        all_label: "All Categories",
        key: document_category,
        options: options_of::<DocumentCategory>,
    },
    status: Facet {
        field: "status",
        all_label: "All Status",
        key: document_status,
        options: options_of::<DocumentStatus>,
    },
};

pub static AUDITS: Schema<Audit> = Schema {
    domain: Domain::Audits,
    identifier: audit_id,
    search_fields: &[audit_title],
    filter: Facet {
        field: "status",
        all_label: "All Status",
        key: audit_status,
        options: options_of::<ScheduleStatus>,
    },
    status: Facet {
        field: "status",
        all_label: "All Status",
        key: audit_status,
        options: options_of::<ScheduleStatus>,
    },
};

pub static TRAINING: Schema<TrainingSession> = Schema {
    domain: Domain::Training,
    identifier: training_id,
    search_fields: &[training_title],
    filter: Facet {
        field: "status",
        all_label: "All Status",
        key: training_status,
        options: options_of::<ScheduleStatus>,
    },
    status: Facet {
        field: "status",
        all_label: "All Status",
        key: training_status,
        options: options_of::<ScheduleStatus>,
    },
};

// Reports are searched by title and by their NC-YYYY-NNN identifier.
pub static NON_CONFORMANCES: Schema<NonConformance> = Schema {
    domain: Domain::NonConformance,
    identifier: nc_id,
    search_fields: &[nc_title, nc_identifier],
    filter: Facet {
        field: "status",
        all_label: "All Status",
        key: nc_status,
        options: options_of::<NcStatus>,
    },
    status: Facet {
        field: "status",
        all_label: "All Status",
        key: nc_status,
        options: options_of::<NcStatus>,
    },
};

fn document_id(doc: &Document) -> String {
    doc.id.to_string()
}

fn document_title(doc: &Document) -> &str {
    &doc.title
}

fn document_category(doc: &Document) -> &'static str {
    doc.category.as_str()
}

fn document_status(doc: &Document) -> &'static str {
    doc.status.as_str()
}

fn audit_id(audit: &Audit) -> String {
    audit.id.to_string()
}

fn audit_title(audit: &Audit) -> &str {
    &audit.title
}

fn audit_status(audit: &Audit) -> &'static str {
    audit.status.as_str()
}

fn training_id(session: &TrainingSession) -> String {
    session.id.to_string()
}

fn training_title(session: &TrainingSession) -> &str {
    &session.title
}

fn training_status(session: &TrainingSession) -> &'static str {
    session.status.as_str()
}

fn nc_id(nc: &NonConformance) -> String {
    nc.id.clone()
}

fn nc_title(nc: &NonConformance) -> &str {
    &nc.title
}

fn nc_identifier(nc: &NonConformance) -> &str {
    &nc.id
}

fn nc_status(nc: &NonConformance) -> &'static str {
    nc.status.as_str()
}
