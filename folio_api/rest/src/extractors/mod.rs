mod contact_form;
