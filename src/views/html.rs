//! Render HTML de las pantallas. Todo texto interpolado pasa por `Escaped`.

use std::fmt::{self, Write};

use crate::algorithm::SelectionFilter;
use crate::session::Notice;
use crate::views::{
    FilterBar, FormView, RelationshipRow, RelationshipsPage, SelectOption, StudentRow,
    StudentsDetail, StudentsPage, TableBody,
};

const STYLE: &str = "body{font-family:sans-serif;margin:2rem}\
table{border-collapse:collapse;width:100%;margin-top:1rem}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left}\
.filters,.filter-group{display:flex;gap:10px;align-items:center;margin:.5rem 0}\
.notice-success{color:#155724}.notice-error{color:#721c24}\
.students-display-row td{background:#f6f6f6}";

/// Escapa `& < > " '` al formatear.
pub struct Escaped<'a>(pub &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#39;")?,
                _ => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

pub fn render_students_page(page: &StudentsPage) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_students_page(&mut out, page)?;
    Ok(out)
}

pub fn render_relationships_page(page: &RelationshipsPage) -> Result<String, fmt::Error> {
    let mut out = String::new();
    write_relationships_page(&mut out, page)?;
    Ok(out)
}

fn write_head(out: &mut String, title: &str) -> fmt::Result {
    write!(
        out,
        "<!DOCTYPE html>\n<html lang='pt-BR'>\n<head>\n<meta charset='utf-8'>\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n\
         <nav><a href='/alunos'>Alunos</a> | <a href='/relacionamentos'>Relacionamentos</a></nav>\n\
         <h1>{}</h1>\n",
        Escaped(title),
        STYLE,
        Escaped(title)
    )
}

fn write_notice(out: &mut String, notice: Option<&Notice>) -> fmt::Result {
    match notice {
        Some(Notice::Success(msg)) => {
            writeln!(out, "<p class='notice-success' role='status'>{}</p>", Escaped(msg))
        }
        Some(Notice::Error(msg)) => {
            writeln!(out, "<p class='notice-error' role='alert'>{}</p>", Escaped(msg))
        }
        None => Ok(()),
    }
}

fn write_options(out: &mut String, options: &[SelectOption]) -> fmt::Result {
    for opt in options {
        write!(
            out,
            "<option value='{}'{}>{}</option>",
            opt.value,
            if opt.selected { " selected" } else { "" },
            Escaped(&opt.label)
        )?;
    }
    Ok(())
}

/// Select con una opción vacía inicial (`value=''`).
fn write_select(
    out: &mut String,
    attrs: &str,
    placeholder: &str,
    options: &[SelectOption],
) -> fmt::Result {
    let none_selected = !options.iter().any(|o| o.selected);
    write!(
        out,
        "<select {}><option value=''{}>{}</option>",
        attrs,
        if none_selected { " selected" } else { "" },
        Escaped(placeholder)
    )?;
    write_options(out, options)?;
    out.write_str("</select>")
}

fn write_filter_bar(out: &mut String, bar: &FilterBar) -> fmt::Result {
    write!(out, "<form class='filters' method='get' action='{}'>", bar.action)?;
    out.write_str("<label>Série ")?;
    write_select(out, "name='degree' id='degree-filter'", "Todas", &bar.degrees)?;
    out.write_str("</label><label>Turma ")?;
    write_select(out, "name='class' id='class-filter'", "Todas", &bar.classes)?;
    out.write_str("</label><button type='submit'>Filtrar</button></form>\n")
}

fn write_message_row(out: &mut String, colspan: u8, message: &str) -> fmt::Result {
    writeln!(out, "<tr><td colspan='{}'>{}</td></tr>", colspan, Escaped(message))
}

// ---------------------------------------------------------------------------
// Alunos

fn write_students_page(out: &mut String, page: &StudentsPage) -> fmt::Result {
    write_head(out, "Alunos")?;
    write_notice(out, page.notice.as_ref())?;
    if let Some(bar) = &page.filter_bar {
        write_filter_bar(out, bar)?;
    }
    let q = page.filter.query_suffix();
    if page.chart_revision.is_some() {
        writeln!(
            out,
            "<form method='post' action='/alunos/gerar{}'>\
             <button type='submit' class='action-button generate-btn'>Gerar Alunos</button>\
             <span> Total: {}</span></form>",
            Escaped(&q),
            page.total_students
        )?;
    }

    out.write_str(
        "<table id='students-table'>\n<thead><tr><th>RA</th><th>Nome</th><th>Série</th>\
         <th>Turma</th><th>Ações</th></tr></thead>\n<tbody id='students-table-body'>\n",
    )?;
    match &page.body {
        TableBody::Failed(msg) => write_message_row(out, 5, msg)?,
        TableBody::Empty(msg) => write_message_row(out, 5, msg)?,
        TableBody::Rows(rows) => {
            for row in rows {
                write_student_row(out, row, &page.filter)?;
            }
        }
    }
    out.write_str("</tbody>\n</table>\n")?;

    if let Some(rev) = page.chart_revision {
        writeln!(
            out,
            "<figure><img id='students-chart' src='/alunos/grafico.svg?v={}' \
             alt='Alunos por série'></figure>",
            rev
        )?;
    }
    out.write_str("</body>\n</html>\n")
}

fn write_student_row(out: &mut String, row: &StudentRow, filter: &SelectionFilter) -> fmt::Result {
    let q = filter.query_suffix();
    match row {
        StudentRow::Display(view) => {
            let s = &view.student;
            write!(
                out,
                "<tr data-student-id='{id}'><td>{ra}</td><td>{name}</td><td>{degree}</td><td>{class}</td>\
                 <td><form method='post' action='/alunos/{id}/editar{q}'>\
                 <button type='submit' class='action-button edit-btn'>Editar</button></form></td></tr>\n",
                id = s.id,
                ra = s.ra,
                name = Escaped(&s.name),
                degree = Escaped(view.degree_name.display_name()),
                class = Escaped(view.class_name.display_name()),
                q = Escaped(&q),
            )
        }
        StudentRow::Editing { view, degrees, classes } => {
            let s = &view.student;
            let form_id = format!("edit-{}", s.id);
            write!(
                out,
                "<tr data-student-id='{id}' class='editing'>\
                 <td><input form='{f}' id='editRa' name='ra' type='number' min='0' value='{ra}'></td>\
                 <td><input form='{f}' id='editName' name='name' type='text' required value='{name}'></td><td>",
                id = s.id,
                f = form_id,
                ra = s.ra,
                name = Escaped(&s.name),
            )?;
            write!(out, "<select form='{}' id='editDegree' name='degree'>", form_id)?;
            write_options(out, degrees)?;
            write!(out, "</select></td><td><select form='{}' id='editClass' name='class'>", form_id)?;
            write_options(out, classes)?;
            write!(
                out,
                "</select></td><td>\
                 <form id='{f}' method='post' action='/alunos/{id}/salvar{q}'>\
                 <button type='submit' class='action-button save-btn'>Salvar</button></form>\
                 <form method='post' action='/alunos/{id}/cancelar{q}'>\
                 <button type='submit' class='action-button cancel-btn'>Cancelar</button></form>\
                 </td></tr>\n",
                f = form_id,
                id = s.id,
                q = Escaped(&q),
            )
        }
    }
}

// ---------------------------------------------------------------------------
// Relacionamentos

fn write_relationships_page(out: &mut String, page: &RelationshipsPage) -> fmt::Result {
    write_head(out, "Relacionamentos")?;
    write_notice(out, page.notice.as_ref())?;
    if let Some(bar) = &page.filter_bar {
        write_filter_bar(out, bar)?;
    }

    out.write_str(
        "<table id='relationships-table'>\n<thead><tr><th>Professor</th><th>Matéria</th>\
         <th>Séries</th><th>Turmas</th><th>Ações</th></tr></thead>\n<tbody>\n",
    )?;
    match &page.body {
        TableBody::Failed(msg) => write_message_row(out, 5, msg)?,
        TableBody::Empty(msg) => write_message_row(out, 5, msg)?,
        TableBody::Rows(rows) => {
            for row in rows {
                write_relationship_row(out, row, &page.filter)?;
            }
        }
    }
    out.write_str("</tbody>\n</table>\n")?;

    if let Some(form) = &page.form {
        write_relationship_form(out, form, &page.filter)?;
    }
    out.write_str("</body>\n</html>\n")
}

fn write_relationship_row(
    out: &mut String,
    row: &RelationshipRow,
    filter: &SelectionFilter,
) -> fmt::Result {
    let view = &row.view;
    let degree_ids: Vec<String> = view.degree_ids().iter().map(|id| id.to_string()).collect();
    let class_lines: Vec<String> = view
        .class_lines()
        .iter()
        .map(|line| Escaped(line).to_string())
        .collect();
    let label = if row.detail.is_some() { "Ocultar Alunos" } else { "Ver Alunos" };

    write!(
        out,
        "<tr data-relationship-id='{id}'><td>{teacher}</td><td>{matter}</td><td>{degrees}</td>\
         <td>{classes}</td><td><form method='post' action='/relacionamentos/{id}/alunos{q}'>\
         <button type='submit' class='action-button generate-btn show-students-btn' \
         data-degree-ids='{ids}'>{label}</button></form></td></tr>\n",
        id = view.id,
        teacher = Escaped(view.teacher_name.display_name()),
        matter = Escaped(view.matter_name.display_name()),
        degrees = Escaped(&view.degree_names()),
        classes = class_lines.join("<br>"),
        q = Escaped(&filter.query_suffix()),
        ids = degree_ids.join(","),
        label = label,
    )?;

    match &row.detail {
        Some(StudentsDetail::Names(names)) => writeln!(
            out,
            "<tr class='students-display-row' data-relationship-id='{}'><td colspan='5'>\
             <b>Alunos na(s) série(s):</b> {}</td></tr>",
            view.id,
            Escaped(&names.join(", "))
        ),
        Some(StudentsDetail::Empty(msg)) => writeln!(
            out,
            "<tr class='students-display-row' data-relationship-id='{}'><td colspan='5'>\
             <b>{}</b></td></tr>",
            view.id,
            Escaped(msg)
        ),
        None => Ok(()),
    }
}

fn write_relationship_form(
    out: &mut String,
    form: &FormView,
    filter: &SelectionFilter,
) -> fmt::Result {
    let q = Escaped(&filter.query_suffix()).to_string();
    write!(
        out,
        "<h2>Adicionar Relacionamento</h2>\n\
         <form id='add-relationship-form' method='post' action='/relacionamentos{}'>\n\
         <div class='filter-group'><label>Professor ",
        q
    )?;
    write_select(out, "name='teacher' id='new-teacher' required", "Selecione o Professor", &form.teachers)?;
    out.write_str("</label><label>Matéria ")?;
    write_select(out, "name='matter' id='new-matter' required", "Selecione a Matéria", &form.matters)?;
    out.write_str("</label></div>\n<div id='degree-class-pairs'>\n")?;

    for pair in &form.pairs {
        out.write_str("<div class='filter-group'>")?;
        write_select(
            out,
            &format!("name='degree_{}' class='new-degree-select' required", pair.index),
            "Selecione a Série",
            &pair.degrees,
        )?;
        write_select(
            out,
            &format!("name='class_{}' class='new-class-select' required", pair.index),
            "Selecione a Turma",
            &pair.classes,
        )?;
        if pair.removable {
            write!(
                out,
                "<button type='submit' formnovalidate formaction='/relacionamentos/pares/{}/remover{}' \
                 class='action-button cancel-btn'>X</button>",
                pair.index, q
            )?;
        }
        out.write_str("</div>\n")?;
    }

    write!(
        out,
        "</div>\n<button type='submit' formnovalidate formaction='/relacionamentos/pares{}' \
         id='add-degree-class-pair'>Adicionar Série/Turma</button>\n\
         <button type='submit'>Adicionar Relacionamento</button>\n</form>\n",
        q
    )
}
